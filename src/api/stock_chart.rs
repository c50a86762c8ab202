use tracing::{debug, trace};

use crate::core::{PaneDescriptor, PaneExtent, PaneId, PaneLayoutAllocator, PaneLayoutPlan};
use crate::error::{StockToolsError, StockToolsResult};
use crate::toolbar::{ToolbarButtonView, ToolbarState};

use super::bindings::{BindingKind, binding_kind, indicator_requires_pane};
use super::config::StockToolsConfig;
use super::observer::{PopupRequest, StockToolsObserver};

/// What triggered a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    PaneAdded(PaneId),
    PaneRemoved(PaneId),
    PlotResized,
}

struct Toolbar {
    views: Vec<ToolbarButtonView>,
    state: ToolbarState,
}

/// Stock-tools state owned by one chart instance.
///
/// Holds the ordered panes, the layout allocator and the toolbar. Every pane
/// change recomputes the layout and applies it to all panes in one step.
pub struct StockToolsChart {
    allocator: PaneLayoutAllocator,
    panes: Vec<PaneDescriptor>,
    next_pane_id: u32,
    plot_height_px: f64,
    toolbar: Option<Toolbar>,
    observers: Vec<Box<dyn StockToolsObserver>>,
}

impl StockToolsChart {
    /// Creates the chart with a single main pane covering the whole plot.
    pub fn new(config: StockToolsConfig, plot_height_px: f64) -> StockToolsResult<Self> {
        validate_plot_height(plot_height_px)?;
        let allocator = PaneLayoutAllocator::new(config.layout)?;

        let toolbar = if config.gui.enabled {
            let views =
                config
                    .gui
                    .builder()
                    .build(&config.gui.buttons, &config.gui.definitions, &config.labels)?;
            let state = ToolbarState::from_views(&views)
                .with_visibility(config.gui.visible, config.gui.placed);
            Some(Toolbar { views, state })
        } else {
            None
        };

        let main_pane = PaneDescriptor::new(PaneId::new(0)).with_percent_geometry(0.0, 100.0);
        Ok(Self {
            allocator,
            panes: vec![main_pane],
            next_pane_id: 1,
            plot_height_px,
            toolbar,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn panes(&self) -> &[PaneDescriptor] {
        &self.panes
    }

    #[must_use]
    pub fn pane(&self, pane_id: PaneId) -> Option<&PaneDescriptor> {
        self.panes.iter().find(|pane| pane.id == pane_id)
    }

    #[must_use]
    pub fn plot_height_px(&self) -> f64 {
        self.plot_height_px
    }

    #[must_use]
    pub fn allocator(&self) -> &PaneLayoutAllocator {
        &self.allocator
    }

    /// Appends an indicator pane without geometry and relayouts.
    pub fn add_pane(&mut self) -> (PaneId, PaneLayoutPlan) {
        let pane_id = self.allocate_pane_id();
        self.panes.push(PaneDescriptor::new(pane_id));
        let plan = self.relayout(LayoutChange::PaneAdded(pane_id));
        (pane_id, plan)
    }

    /// Appends a pane with an explicit height and relayouts.
    pub fn add_pane_with_height(&mut self, height: PaneExtent) -> (PaneId, PaneLayoutPlan) {
        let pane_id = self.allocate_pane_id();
        self.panes
            .push(PaneDescriptor::new(pane_id).with_height(height));
        let plan = self.relayout(LayoutChange::PaneAdded(pane_id));
        (pane_id, plan)
    }

    /// Appends a navigator pane. Navigator panes never take part in layout.
    pub fn add_navigator_pane(&mut self, height_px: f64) -> PaneId {
        let pane_id = self.allocate_pane_id();
        self.panes.push(
            PaneDescriptor::navigator(pane_id).with_height(PaneExtent::Pixels(height_px)),
        );
        debug!(pane = pane_id.raw(), "added navigator pane");
        pane_id
    }

    /// Removes a pane and relayouts the remaining ones.
    pub fn remove_pane(&mut self, pane_id: PaneId) -> StockToolsResult<PaneLayoutPlan> {
        let index = self
            .panes
            .iter()
            .position(|pane| pane.id == pane_id)
            .ok_or(StockToolsError::UnknownPane { id: pane_id })?;
        let removed = self.panes.remove(index);
        trace!(pane = pane_id.raw(), navigator = removed.is_navigator, "removed pane");
        Ok(self.relayout(LayoutChange::PaneRemoved(pane_id)))
    }

    /// Updates the plot height used to read pixel-sized panes.
    pub fn set_plot_height(&mut self, plot_height_px: f64) -> StockToolsResult<PaneLayoutPlan> {
        validate_plot_height(plot_height_px)?;
        self.plot_height_px = plot_height_px;
        Ok(self.relayout(LayoutChange::PlotResized))
    }

    /// Adds an indicator, giving it a pane when its type needs one, then
    /// disarms the indicators button.
    pub fn add_indicator(&mut self, indicator_type: &str) -> Option<PaneId> {
        let pane_id = if indicator_requires_pane(indicator_type) {
            Some(self.add_pane().0)
        } else {
            None
        };
        debug!(indicator_type, pane = ?pane_id, "added indicator");
        self.finish_binding();
        pane_id
    }

    /// Removes an indicator together with its dedicated pane, if any.
    pub fn remove_indicator(
        &mut self,
        indicator_type: &str,
        pane_id: Option<PaneId>,
    ) -> StockToolsResult<()> {
        if let Some(pane_id) = pane_id.filter(|_| indicator_requires_pane(indicator_type)) {
            self.remove_pane(pane_id)?;
        }
        debug!(indicator_type, pane = ?pane_id, "removed indicator");
        self.finish_binding();
        Ok(())
    }

    #[must_use]
    pub fn toolbar_enabled(&self) -> bool {
        self.toolbar.is_some()
    }

    #[must_use]
    pub fn toolbar_views(&self) -> &[ToolbarButtonView] {
        self.toolbar
            .as_ref()
            .map(|toolbar| toolbar.views.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn toolbar(&self) -> Option<&ToolbarState> {
        self.toolbar.as_ref().map(|toolbar| &toolbar.state)
    }

    /// Click on a top-level button.
    pub fn click(&mut self, button: &str) -> StockToolsResult<()> {
        let Some(toolbar) = self.toolbar.as_mut() else {
            return Ok(());
        };
        if toolbar.state.click(button)? {
            self.dispatch_armed(button)?;
        }
        Ok(())
    }

    /// Click on the arrow of a submenu parent. Returns whether the submenu is open.
    pub fn click_submenu_arrow(&mut self, button: &str) -> StockToolsResult<bool> {
        match self.toolbar.as_mut() {
            Some(toolbar) => toolbar.state.toggle_submenu(button),
            None => Ok(false),
        }
    }

    /// Click on `item` inside the submenu of `parent`.
    pub fn click_submenu_item(&mut self, parent: &str, item: &str) -> StockToolsResult<()> {
        let Some(toolbar) = self.toolbar.as_mut() else {
            return Ok(());
        };
        toolbar.state.select_submenu_item(parent, item)?;
        self.dispatch_armed(parent)
    }

    pub fn external_select(&mut self, button: &str) -> StockToolsResult<()> {
        match self.toolbar.as_mut() {
            Some(toolbar) => toolbar.state.external_select(button),
            None => Ok(()),
        }
    }

    pub fn external_deselect(&mut self, button: &str) -> StockToolsResult<()> {
        match self.toolbar.as_mut() {
            Some(toolbar) => toolbar.state.external_deselect(button),
            None => Ok(()),
        }
    }

    /// The user starts the armed tool on the chart. Returns the tool name.
    pub fn start_binding(&mut self) -> Option<String> {
        let tool = self.toolbar()?.armed_tool()?.to_owned();
        if let BindingKind::PopupOnStart(form_type) = binding_kind(&tool) {
            self.emit_show_popup(&PopupRequest {
                form_type,
                tool: tool.clone(),
            });
        }
        trace!(tool = %tool, "binding started");
        Some(tool)
    }

    /// The armed tool completed its work; disarms it and signals `deselectButton`.
    pub fn finish_binding(&mut self) {
        let Some(button) = self
            .toolbar()
            .and_then(ToolbarState::active_button)
            .map(str::to_owned)
        else {
            return;
        };
        self.deselect(&button);
    }

    pub fn toggle_toolbar_visibility(&mut self) -> bool {
        self.toolbar
            .as_mut()
            .is_some_and(|toolbar| toolbar.state.toggle_visibility())
    }

    /// Registers an observer with a unique, non-empty id.
    pub fn register_observer(
        &mut self,
        observer: Box<dyn StockToolsObserver>,
    ) -> StockToolsResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(StockToolsError::InvalidConfig(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(StockToolsError::DuplicateObserver(observer_id));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|observer| observer.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    fn dispatch_armed(&mut self, button: &str) -> StockToolsResult<()> {
        let Some(tool) = self
            .toolbar()
            .and_then(ToolbarState::armed_tool)
            .map(str::to_owned)
        else {
            return Ok(());
        };
        match binding_kind(&tool) {
            BindingKind::Inert => {
                if let Some(toolbar) = self.toolbar.as_mut() {
                    toolbar.state.external_deselect(button)?;
                }
            }
            BindingKind::Instant => self.deselect(button),
            BindingKind::PopupOnSelect(form_type) => {
                self.emit_show_popup(&PopupRequest { form_type, tool });
            }
            BindingKind::PopupOnStart(_) | BindingKind::Drawing => {
                trace!(button, tool = %tool, "tool armed");
            }
        }
        Ok(())
    }

    fn deselect(&mut self, button: &str) {
        if let Some(toolbar) = self.toolbar.as_mut() {
            if toolbar.state.external_deselect(button).is_err() {
                return;
            }
        }
        for observer in &mut self.observers {
            observer.on_deselect_button(button);
        }
    }

    fn emit_show_popup(&mut self, request: &PopupRequest) {
        for observer in &mut self.observers {
            observer.on_show_popup(request);
        }
    }

    fn allocate_pane_id(&mut self) -> PaneId {
        let pane_id = PaneId::new(self.next_pane_id);
        self.next_pane_id = self.next_pane_id.saturating_add(1);
        pane_id
    }

    fn relayout(&mut self, change: LayoutChange) -> PaneLayoutPlan {
        let plan = self.allocator.resize(&self.panes, self.plot_height_px);
        for placement in &plan.placements {
            if let Some(pane) = self
                .panes
                .iter_mut()
                .find(|pane| pane.id == placement.pane_id)
            {
                pane.apply(placement);
            }
        }
        debug!(
            ?change,
            panes = plan.placements.len(),
            branch = ?plan.branch,
            "applied pane layout"
        );
        plan
    }
}

fn validate_plot_height(plot_height_px: f64) -> StockToolsResult<()> {
    if !plot_height_px.is_finite() || plot_height_px <= 0.0 {
        return Err(StockToolsError::InvalidConfig(format!(
            "plot height must be finite and > 0, got {plot_height_px}"
        )));
    }
    Ok(())
}
