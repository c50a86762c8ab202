use thiserror::Error;

use crate::core::PaneId;

pub type StockToolsResult<T> = Result<T, StockToolsError>;

#[derive(Debug, Error)]
pub enum StockToolsError {
    #[error("toolbar button `{name}` has no definition")]
    UnknownButton { name: String },

    #[error("submenu item `{name}` of `{parent}` has no definition")]
    UnknownSubmenuItem { parent: String, name: String },

    #[error("pane {id:?} does not exist")]
    UnknownPane { id: PaneId },

    #[error("invalid pane extent: {0}")]
    InvalidExtent(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("pane layout invariant violated: {0}")]
    LayoutInvariant(String),

    #[error("observer with id `{0}` is already registered")]
    DuplicateObserver(String),
}
