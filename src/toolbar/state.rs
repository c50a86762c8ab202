use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{StockToolsError, StockToolsResult};

use super::builder::ToolbarButtonView;

/// Which tool is armed to act on the next chart interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarSelection {
    Idle,
    Armed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ButtonEntry {
    items: Vec<String>,
    representative: Option<String>,
}

/// Selection bookkeeping for one toolbar.
///
/// Buttons are keyed by name; repeated names (separators) share one entry.
/// At most one top-level button is active and at most one submenu is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    buttons: IndexMap<String, ButtonEntry>,
    active: Option<String>,
    open_submenu: Option<String>,
    visible: bool,
    placed: bool,
}

impl ToolbarState {
    #[must_use]
    pub fn from_views(views: &[ToolbarButtonView]) -> Self {
        let mut buttons = IndexMap::with_capacity(views.len());
        for view in views {
            let items: Vec<String> = view.items.iter().map(|item| item.name.clone()).collect();
            let representative = items.first().cloned();
            buttons
                .entry(view.name.clone())
                .or_insert(ButtonEntry {
                    items,
                    representative,
                });
        }
        Self {
            buttons,
            active: None,
            open_submenu: None,
            visible: true,
            placed: false,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: bool, placed: bool) -> Self {
        self.visible = visible;
        self.placed = placed;
        self
    }

    #[must_use]
    pub fn selection(&self) -> ToolbarSelection {
        match &self.active {
            Some(name) => ToolbarSelection::Armed(name.clone()),
            None => ToolbarSelection::Idle,
        }
    }

    #[must_use]
    pub fn active_button(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    #[must_use]
    pub fn open_submenu(&self) -> Option<&str> {
        self.open_submenu.as_deref()
    }

    /// Submenu item currently standing in for `parent`.
    #[must_use]
    pub fn representative(&self, parent: &str) -> Option<&str> {
        self.buttons
            .get(parent)
            .and_then(|entry| entry.representative.as_deref())
    }

    /// Tool the armed button will run: the representative item for submenu
    /// parents, the button itself otherwise.
    #[must_use]
    pub fn armed_tool(&self) -> Option<&str> {
        let active = self.active.as_deref()?;
        Some(self.representative(active).unwrap_or(active))
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn placed(&self) -> bool {
        self.placed
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.buttons.contains_key(name)
    }

    /// Top-level button owning the submenu item `name`.
    #[must_use]
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.buttons
            .iter()
            .find(|(_, entry)| entry.items.iter().any(|item| item == name))
            .map(|(parent, _)| parent.as_str())
    }

    /// Click on a top-level button: disarms every other button, then toggles
    /// this one. Returns whether the button ended up active.
    pub fn click(&mut self, name: &str) -> StockToolsResult<bool> {
        self.require_button(name)?;
        self.erase_active_buttons(Some(name));
        Ok(self.select_button(name))
    }

    /// Opens the submenu of `name`, or closes it when already open. Any other
    /// open submenu closes first. Returns whether the submenu is now open.
    pub fn toggle_submenu(&mut self, name: &str) -> StockToolsResult<bool> {
        self.require_button(name)?;
        self.erase_active_buttons(Some(name));
        if self.open_submenu.as_deref() == Some(name) {
            trace!(button = name, "close submenu");
            self.open_submenu = None;
            return Ok(false);
        }
        if !self.has_submenu(name) {
            return Ok(false);
        }
        trace!(button = name, "open submenu");
        self.open_submenu = Some(name.to_owned());
        Ok(true)
    }

    /// Picks `item` from the submenu of `parent`: the item becomes the
    /// parent's representative, the parent is armed and the submenu closes.
    pub fn select_submenu_item(&mut self, parent: &str, item: &str) -> StockToolsResult<()> {
        let entry = self
            .buttons
            .get_mut(parent)
            .ok_or_else(|| StockToolsError::UnknownButton {
                name: parent.to_owned(),
            })?;
        if !entry.items.iter().any(|candidate| candidate == item) {
            return Err(StockToolsError::UnknownSubmenuItem {
                parent: parent.to_owned(),
                name: item.to_owned(),
            });
        }
        entry.representative = Some(item.to_owned());

        self.erase_active_buttons(Some(parent));
        self.open_submenu = None;
        self.arm(parent);
        Ok(())
    }

    /// Toggles the active state of `name`. Activating replaces any previously
    /// active button. Returns whether `name` is active afterwards.
    pub fn select_button(&mut self, name: &str) -> bool {
        if self.is_active(name) {
            trace!(button = name, "disarm");
            self.active = None;
            false
        } else {
            self.arm(name);
            true
        }
    }

    /// Clears the active state and closes the submenu of every button other
    /// than `except`, leaving at most `except` armed.
    pub fn erase_active_buttons(&mut self, except: Option<&str>) {
        if self.active.is_some() && self.active.as_deref() != except {
            trace!(button = ?self.active, "erase active");
            self.active = None;
        }
        if self.open_submenu.is_some() && self.open_submenu.as_deref() != except {
            self.open_submenu = None;
        }
    }

    /// Arms `name` (or the parent of a submenu item) on behalf of a binding.
    pub fn external_select(&mut self, name: &str) -> StockToolsResult<()> {
        let target = self.resolve_top_level(name)?;
        self.erase_active_buttons(Some(target.as_str()));
        if !self.is_active(&target) {
            self.arm(&target);
        }
        Ok(())
    }

    /// Disarms `name` (or the parent of a submenu item) once its binding is done.
    pub fn external_deselect(&mut self, name: &str) -> StockToolsResult<()> {
        let target = self.resolve_top_level(name)?;
        if self.is_active(&target) {
            trace!(button = %target, "disarm from binding");
            self.active = None;
        }
        Ok(())
    }

    /// Shows or hides the whole toolbar; hiding closes the open submenu.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.placed = true;
        if !self.visible {
            self.open_submenu = None;
        }
        self.visible
    }

    /// Arming always closes the open submenu, including the armed button's own.
    fn arm(&mut self, name: &str) {
        trace!(button = name, previous = ?self.active, "arm");
        self.active = Some(name.to_owned());
        self.open_submenu = None;
    }

    fn has_submenu(&self, name: &str) -> bool {
        self.buttons
            .get(name)
            .is_some_and(|entry| !entry.items.is_empty())
    }

    fn require_button(&self, name: &str) -> StockToolsResult<()> {
        if self.buttons.contains_key(name) {
            Ok(())
        } else {
            Err(StockToolsError::UnknownButton {
                name: name.to_owned(),
            })
        }
    }

    fn resolve_top_level(&self, name: &str) -> StockToolsResult<String> {
        if self.buttons.contains_key(name) {
            return Ok(name.to_owned());
        }
        self.parent_of(name)
            .map(str::to_owned)
            .ok_or_else(|| StockToolsError::UnknownButton {
                name: name.to_owned(),
            })
    }
}
