//! Terminal front-end for the crm system.
//!
//! - [`table`]: the generic record table and its rendering-independent view
//! - [`panel`]: the view/edit/create panel session
//! - [`page`]: per-entity pages that keep a list in step with the API
//! - [`store`]: record lists and the reducer that reconciles them
//! - [`form`]: per-entity forms, text to JSON and back
//! - [`dashboard`]: headline counts and status distributions
//!
//! Styling follows the Ayu palette and honours `NO_COLOR`.

pub mod columns;
pub mod dashboard;
pub mod form;
pub mod notify;
pub mod page;
pub mod pager;
pub mod panel;
pub mod store;
pub mod styles;
pub mod table;
pub mod terminal;

pub use columns::{EntityView, record_table};
pub use dashboard::{DashboardSummary, load_dashboard};
pub use form::{FormError, FormSpec};
pub use notify::{CollectingNotifier, Notification, Notifier, TerminalNotifier};
pub use page::EntityPage;
pub use panel::{PanelMode, PanelSession};
pub use store::{ListAction, RecordLists, reduce};
pub use table::{Column, RecordTable, RowHandler, TableView};
