use proptest::prelude::*;
use stock_tools::core::{
    PaneDescriptor, PaneExtent, PaneId, PaneLayoutAllocator, PaneLayoutPlan, ResizeLink,
};

/// Panes filling the plot, sized proportionally to `weights`.
fn filled_panes(weights: &[f64]) -> Vec<PaneDescriptor> {
    let total: f64 = weights.iter().sum();
    let mut top = 0.0;
    weights
        .iter()
        .enumerate()
        .map(|(index, weight)| {
            let height = weight / total * 100.0;
            let pane = PaneDescriptor::new(PaneId::new(index as u32))
                .with_percent_geometry(top, height);
            top += height;
            pane
        })
        .collect()
}

fn assert_invariants(plan: &PaneLayoutPlan) -> Result<(), TestCaseError> {
    let total: f64 = plan.placements.iter().map(|p| p.height_percent).sum();
    prop_assert!((total - 100.0).abs() <= 1e-9, "heights sum to {}", total);
    prop_assert!(plan.placements[0].top_percent.abs() <= 1e-9);
    for pair in plan.placements.windows(2) {
        prop_assert!(
            (pair[1].top_percent - (pair[0].top_percent + pair[0].height_percent)).abs() <= 1e-9
        );
        prop_assert_eq!(pair[0].resize, ResizeLink::to(pair[1].pane_id));
    }
    prop_assert_eq!(
        plan.placements[plan.placements.len() - 1].resize,
        ResizeLink::disabled()
    );
    prop_assert!(plan.verify().is_ok());
    Ok(())
}

proptest! {
    #[test]
    fn adding_a_pane_keeps_layout_invariants(
        weights in prop::collection::vec(1.0f64..10.0, 1..12)
    ) {
        let mut panes = filled_panes(&weights);
        panes.push(PaneDescriptor::new(PaneId::new(weights.len() as u32)));
        let plan = PaneLayoutAllocator::default().resize(&panes, 720.0);

        prop_assert_eq!(plan.placements.len(), weights.len() + 1);
        assert_invariants(&plan)?;
        let last = plan.placements[plan.placements.len() - 1];
        prop_assert_eq!(last.pane_id, PaneId::new(weights.len() as u32));
    }

    #[test]
    fn removing_a_pane_keeps_layout_invariants(
        weights in prop::collection::vec(1.0f64..10.0, 2..12),
        remove_seed in any::<prop::sample::Index>()
    ) {
        let mut panes = filled_panes(&weights);
        let removed = remove_seed.index(panes.len());
        panes.remove(removed);
        let plan = PaneLayoutAllocator::default().resize(&panes, 720.0);

        prop_assert_eq!(plan.placements.len(), weights.len() - 1);
        assert_invariants(&plan)?;
    }

    #[test]
    fn navigator_panes_never_change_the_result(
        weights in prop::collection::vec(1.0f64..10.0, 1..8),
        navigator_px in 10.0f64..200.0
    ) {
        let mut panes = filled_panes(&weights);
        panes.push(PaneDescriptor::new(PaneId::new(100)));
        let without_navigator = PaneLayoutAllocator::default().resize(&panes, 720.0);

        panes.insert(
            0,
            PaneDescriptor::navigator(PaneId::new(200)).with_height(PaneExtent::Pixels(navigator_px)),
        );
        let with_navigator = PaneLayoutAllocator::default().resize(&panes, 720.0);

        prop_assert_eq!(without_navigator, with_navigator);
    }

    #[test]
    fn pixel_sized_layout_matches_invariants(
        pixel_heights in prop::collection::vec(20.0f64..200.0, 1..8)
    ) {
        let plot_height: f64 = pixel_heights.iter().sum();
        let mut top = 0.0;
        let mut panes: Vec<PaneDescriptor> = pixel_heights
            .iter()
            .enumerate()
            .map(|(index, height)| {
                let pane = PaneDescriptor::new(PaneId::new(index as u32))
                    .with_top(PaneExtent::Pixels(top))
                    .with_height(PaneExtent::Pixels(*height));
                top += height;
                pane
            })
            .collect();
        panes.push(PaneDescriptor::new(PaneId::new(pixel_heights.len() as u32)));
        let plan = PaneLayoutAllocator::default().resize(&panes, plot_height);

        assert_invariants(&plan)?;
    }
}
