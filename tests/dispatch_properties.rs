//! Behavioural properties of the two dispatchers over generated fleets

use proptest::prelude::*;

use powerplant_dispatch::dispatch::{
    dispatch_heuristic, dispatch_optimal, output_range, total_cost, DispatchError,
};
use powerplant_dispatch::domain::{total_power, Allocation, FuelPrices, LoadRequest, Plant, PlantKind};

fn fuels(wind_availability: u8) -> FuelPrices {
    FuelPrices {
        gas_price: 13.4,
        kerosene_price: 50.8,
        co2_price: 20.0,
        wind_availability,
    }
}

fn named(plants: Vec<Plant>) -> Vec<Plant> {
    plants
        .into_iter()
        .enumerate()
        .map(|(i, mut plant)| {
            plant.name = format!("plant{i}");
            plant
        })
        .collect()
}

fn thermal(pmin_max: f64) -> impl Strategy<Value = Plant> {
    (any::<bool>(), 0.2f64..1.0, 0.0f64..1.0, 1.0f64..300.0).prop_map(
        move |(is_gas, efficiency, pmin_share, span)| {
            let kind = if is_gas { PlantKind::Gas } else { PlantKind::Kerosene };
            let pmin = pmin_share * pmin_max;
            Plant::new("", kind, efficiency, pmin, pmin + span)
        },
    )
}

fn wind() -> impl Strategy<Value = Plant> {
    (1.0f64..200.0).prop_map(|pmax| Plant::wind("", pmax))
}

fn fleet(pmin_max: f64) -> impl Strategy<Value = Vec<Plant>> {
    (
        prop::collection::vec(thermal(pmin_max), 1..6),
        prop::collection::vec(wind(), 0..3),
    )
        .prop_map(|(mut thermals, winds)| {
            thermals.extend(winds);
            named(thermals)
        })
}

fn bounds(request: &LoadRequest) -> (f64, f64) {
    request
        .plants
        .iter()
        .filter(|p| !(request.fuels.wind_availability == 0 && p.kind == PlantKind::Wind))
        .map(|p| output_range(p, &request.fuels))
        .fold((0.0, 0.0), |(lo, hi), r| (lo + r.lo, hi + r.hi))
}

fn within_ranges(request: &LoadRequest, allocations: &[Allocation]) -> bool {
    request.plants.iter().zip(allocations).all(|(plant, allocation)| {
        if request.fuels.wind_availability == 0 && plant.kind == PlantKind::Wind {
            allocation.power == 0.0
        } else {
            output_range(plant, &request.fuels).contains(allocation.power, 1e-9)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exact_dispatch_is_feasible(
        plants in fleet(100.0),
        wind_availability in 0u8..=100,
        position in 0.0f64..=1.0,
    ) {
        let mut request = LoadRequest::new(0.0, fuels(wind_availability), plants);
        let (lo, hi) = bounds(&request);
        request.target_load = lo + position * (hi - lo);

        let allocations = dispatch_optimal(&request).unwrap();
        prop_assert_eq!(allocations.len(), request.plants.len());
        prop_assert!((total_power(&allocations) - request.target_load).abs() < 1e-6);
        prop_assert!(within_ranges(&request, &allocations));
    }

    #[test]
    fn exact_dispatch_never_costs_more_than_merit_order(
        plants in fleet(0.0),
        wind_availability in 0u8..=100,
        position in 0.0f64..=1.0,
    ) {
        let mut request = LoadRequest::new(0.0, fuels(wind_availability), plants);
        let (lo, hi) = bounds(&request);
        request.target_load = lo + position * (hi - lo);

        let heuristic = dispatch_heuristic(&request);
        let optimal = dispatch_optimal(&request).unwrap();

        let heuristic_matches = (total_power(&heuristic) - request.target_load).abs() < 1e-6
            && within_ranges(&request, &heuristic);
        prop_assume!(heuristic_matches);

        let heuristic_cost = total_cost(&request, &heuristic);
        let optimal_cost = total_cost(&request, &optimal);
        prop_assert!(
            optimal_cost <= heuristic_cost + 1e-6 * heuristic_cost.abs().max(1.0),
            "optimal {} > heuristic {}",
            optimal_cost,
            heuristic_cost
        );
    }

    #[test]
    fn calm_wind_plants_are_zero_and_listed(
        plants in fleet(50.0),
        load in 0.0f64..1500.0,
    ) {
        let request = LoadRequest::new(load, fuels(0), plants);
        let wind_names: Vec<&str> = request
            .plants
            .iter()
            .filter(|p| p.kind == PlantKind::Wind)
            .map(|p| p.name.as_str())
            .collect();

        let heuristic = dispatch_heuristic(&request);
        let mut results = vec![heuristic];
        if let Ok(optimal) = dispatch_optimal(&request) {
            results.push(optimal);
        }

        for allocations in results {
            prop_assert_eq!(allocations.len(), request.plants.len());
            for name in &wind_names {
                let allocation = allocations.iter().find(|a| a.name == *name);
                prop_assert_eq!(allocation.map(|a| a.power), Some(0.0));
            }
        }
    }

    #[test]
    fn load_above_capacity_is_infeasible(
        plants in fleet(100.0),
        wind_availability in 0u8..=100,
        excess in 1.0f64..500.0,
    ) {
        let mut request = LoadRequest::new(0.0, fuels(wind_availability), plants);
        let (_, hi) = bounds(&request);
        request.target_load = hi + excess;

        let is_infeasible = matches!(
            dispatch_optimal(&request),
            Err(DispatchError::Infeasible { .. })
        );
        prop_assert!(is_infeasible);
    }
}

#[test]
fn windy_reference_scenario() {
    let request = LoadRequest::new(
        480.0,
        fuels(60),
        vec![
            Plant::gas("gas", 0.53, 0.0, 460.0),
            Plant::kerosene("kerosene", 0.37, 0.0, 100.0),
            Plant::wind("wind", 150.0),
        ],
    );

    for allocations in [dispatch_heuristic(&request), dispatch_optimal(&request).unwrap()] {
        assert_eq!(allocations[2].power, 90.0);
        assert!((allocations[0].power - 390.0).abs() < 1e-6);
        assert!(allocations[1].power.abs() < 1e-6);
        assert!((total_power(&allocations) - 480.0).abs() < 1e-6);
    }
}

#[test]
fn calm_reference_scenario() {
    let request = LoadRequest::new(
        480.0,
        fuels(0),
        vec![
            Plant::gas("gas", 0.53, 0.0, 460.0),
            Plant::kerosene("kerosene", 0.37, 0.0, 100.0),
            Plant::wind("wind", 150.0),
        ],
    );

    for allocations in [dispatch_heuristic(&request), dispatch_optimal(&request).unwrap()] {
        assert_eq!(allocations[2].power, 0.0);
        assert!((allocations[0].power + allocations[1].power - 480.0).abs() < 1e-6);
    }
}
