// Typed model of the moodle.org plugin catalog

mod coerce;
pub mod maturity;
pub mod plug_list;
pub mod plugin;
pub mod version;

pub use maturity::Maturity;
pub use plug_list::PlugListResponse;
pub use plugin::Plugin;
pub use version::{PluginVersion, Provenance, VcsInfo};
