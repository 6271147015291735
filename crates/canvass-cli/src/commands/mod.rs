pub mod build;
pub mod external;
pub mod layout;
pub mod powerflow;
pub mod sensor;

use canvass_core::{Diagnostics, Severity};
use tracing::{error, warn};

/// Surface collected diagnostics through the log.
pub fn report(diag: &Diagnostics) {
    for issue in &diag.issues {
        match issue.severity {
            Severity::Warning => warn!("{issue}"),
            Severity::Error => error!("{issue}"),
        }
    }
}
