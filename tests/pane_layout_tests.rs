use approx::assert_abs_diff_eq;
use stock_tools::core::{
    LayoutBranch, PaneDescriptor, PaneExtent, PaneId, PaneLayoutAllocator, PaneLayoutConfig,
    ResizeLink,
};

fn percent_pane(id: u32, top: f64, height: f64) -> PaneDescriptor {
    PaneDescriptor::new(PaneId::new(id)).with_percent_geometry(top, height)
}

fn equal_panes(count: u32, height: f64) -> Vec<PaneDescriptor> {
    (0..count)
        .map(|index| percent_pane(index, f64::from(index) * height, height))
        .collect()
}

fn heights(plan: &stock_tools::core::PaneLayoutPlan) -> Vec<f64> {
    plan.placements.iter().map(|p| p.height_percent).collect()
}

fn tops(plan: &stock_tools::core::PaneLayoutPlan) -> Vec<f64> {
    plan.placements.iter().map(|p| p.top_percent).collect()
}

#[test]
fn adding_second_pane_to_full_height_pane() {
    let panes = vec![percent_pane(0, 0.0, 100.0), PaneDescriptor::new(PaneId::new(1))];
    let plan = PaneLayoutAllocator::default().resize(&panes, 400.0);

    assert_eq!(plan.branch, LayoutBranch::ShrinkFirst);
    assert_eq!(heights(&plan), vec![80.0, 20.0]);
    assert_eq!(tops(&plan), vec![0.0, 80.0]);
    assert_eq!(plan.placements[0].resize, ResizeLink::to(PaneId::new(1)));
    assert_eq!(plan.placements[1].resize, ResizeLink::disabled());
    plan.verify().expect("valid plan");
}

#[test]
fn adding_sixth_pane_redistributes_evenly() {
    let mut panes = equal_panes(5, 20.0);
    panes.push(PaneDescriptor::new(PaneId::new(5)));
    let plan = PaneLayoutAllocator::default().resize(&panes, 500.0);

    assert_eq!(plan.branch, LayoutBranch::RedistributeShrink);
    assert_eq!(plan.placements.len(), 6);
    for placement in &plan.placements {
        assert_abs_diff_eq!(placement.height_percent, 100.0 / 6.0, epsilon = 1e-9);
    }
    let last = plan.placements[5];
    assert_abs_diff_eq!(last.top_percent, 83.333_333_333_333, epsilon = 1e-9);
    assert_abs_diff_eq!(last.height_percent, 16.666_666_666_667, epsilon = 1e-9);
    plan.verify().expect("valid plan");
}

#[test]
fn adding_fifth_pane_still_shrinks_first_only() {
    let mut panes = vec![
        percent_pane(0, 0.0, 40.0),
        percent_pane(1, 40.0, 20.0),
        percent_pane(2, 60.0, 20.0),
        percent_pane(3, 80.0, 20.0),
    ];
    panes.push(PaneDescriptor::new(PaneId::new(4)));
    let plan = PaneLayoutAllocator::default().resize(&panes, 500.0);

    assert_eq!(plan.branch, LayoutBranch::ShrinkFirst);
    assert_eq!(heights(&plan), vec![20.0, 20.0, 20.0, 20.0, 20.0]);
    assert_eq!(tops(&plan), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
}

#[test]
fn removing_down_to_four_panes_returns_space_to_first() {
    let mut panes = equal_panes(5, 20.0);
    panes.remove(2);
    let plan = PaneLayoutAllocator::default().resize(&panes, 500.0);

    assert_eq!(plan.branch, LayoutBranch::GrowFirst);
    assert_eq!(heights(&plan), vec![40.0, 20.0, 20.0, 20.0]);
    assert_eq!(tops(&plan), vec![0.0, 40.0, 60.0, 80.0]);
    assert_eq!(plan.placements[1].resize, ResizeLink::to(PaneId::new(3)));
    plan.verify().expect("valid plan");
}

#[test]
fn removing_down_to_five_panes_shares_space() {
    let mut panes = vec![
        percent_pane(0, 0.0, 50.0),
        percent_pane(1, 50.0, 10.0),
        percent_pane(2, 60.0, 10.0),
        percent_pane(3, 70.0, 10.0),
        percent_pane(4, 80.0, 10.0),
        percent_pane(5, 90.0, 10.0),
    ];
    panes.remove(5);
    let plan = PaneLayoutAllocator::default().resize(&panes, 500.0);

    assert_eq!(plan.branch, LayoutBranch::RedistributeGrow);
    let expected_heights = [52.0, 12.0, 12.0, 12.0, 12.0];
    let expected_tops = [0.0, 52.0, 64.0, 76.0, 88.0];
    for (placement, (height, top)) in plan
        .placements
        .iter()
        .zip(expected_heights.iter().zip(expected_tops.iter()))
    {
        assert_abs_diff_eq!(placement.height_percent, *height, epsilon = 1e-9);
        assert_abs_diff_eq!(placement.top_percent, *top, epsilon = 1e-9);
    }
    assert_eq!(plan.placements[4].resize, ResizeLink::disabled());
    plan.verify().expect("valid plan");
}

#[test]
fn pixel_sized_panes_are_converted_before_layout() {
    let panes = vec![
        PaneDescriptor::new(PaneId::new(0))
            .with_top(PaneExtent::Pixels(0.0))
            .with_height(PaneExtent::Pixels(300.0)),
        PaneDescriptor::new(PaneId::new(1))
            .with_top(PaneExtent::Pixels(300.0))
            .with_height(PaneExtent::Pixels(100.0)),
        PaneDescriptor::new(PaneId::new(2)),
    ];
    let plan = PaneLayoutAllocator::default().resize(&panes, 400.0);

    assert_eq!(heights(&plan), vec![55.0, 25.0, 20.0]);
    assert_eq!(tops(&plan), vec![0.0, 55.0, 80.0]);
}

#[test]
fn custom_default_height_is_used_for_new_panes() {
    let allocator =
        PaneLayoutAllocator::new(PaneLayoutConfig::default().with_default_height_percent(30.0))
            .expect("valid config");
    let panes = vec![percent_pane(0, 0.0, 100.0), PaneDescriptor::new(PaneId::new(1))];
    let plan = allocator.resize(&panes, 400.0);
    assert_eq!(heights(&plan), vec![70.0, 30.0]);

    let plan = allocator.resize_with_default_height(&panes, 400.0, 25.0);
    assert_eq!(heights(&plan), vec![75.0, 25.0]);
}

#[test]
fn navigator_panes_are_excluded_from_layout() {
    let panes = vec![
        percent_pane(0, 0.0, 100.0),
        PaneDescriptor::navigator(PaneId::new(1)).with_height(PaneExtent::Pixels(50.0)),
        PaneDescriptor::new(PaneId::new(2)),
    ];
    let plan = PaneLayoutAllocator::default().resize(&panes, 400.0);

    assert!(plan.placements.iter().all(|p| p.pane_id != PaneId::new(1)));
    assert_eq!(plan.placements[0].resize, ResizeLink::to(PaneId::new(2)));
    assert_eq!(plan.placements[1].resize, ResizeLink::disabled());
}

#[test]
fn zero_panes_is_a_no_op() {
    let plan = PaneLayoutAllocator::default().resize(&[], 400.0);
    assert!(plan.is_empty());
    assert_eq!(plan.branch, LayoutBranch::Empty);
}

#[test]
fn single_pane_gets_whole_plot_without_link() {
    let plan = PaneLayoutAllocator::default().resize(&[percent_pane(0, 10.0, 60.0)], 400.0);
    assert_eq!(plan.branch, LayoutBranch::GrowFirst);
    assert_eq!(heights(&plan), vec![100.0]);
    assert_eq!(tops(&plan), vec![0.0]);
    assert_eq!(plan.placements[0].resize, ResizeLink::disabled());
}

#[test]
fn verify_reports_inconsistent_inputs() {
    let panes = vec![
        percent_pane(0, 0.0, 70.0),
        percent_pane(1, 70.0, 50.0),
        PaneDescriptor::new(PaneId::new(2)),
    ];
    let plan = PaneLayoutAllocator::default().resize(&panes, 400.0);
    assert!(plan.verify().is_err());
}
