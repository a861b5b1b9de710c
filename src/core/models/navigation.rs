use crate::core::models::certificate_record::EntryDetail;
use crate::core::models::outcome::{LoadOutcome, MutationOutcome};

/// Views the front end knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Path and password prompt.
    KeystoreLoad,
    /// Table of certificate entries.
    KeystoreDetails,
    /// One certificate in full.
    EntryDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowScope {
    Primary,
    Secondary,
}

/// A requested view transition.
///
/// The core never builds or dispatches these. Callers derive one from an
/// operation result and hand it to whatever renders views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationSignal {
    pub target_view: View,
    pub window_scope: WindowScope,
    pub resizable: bool,
}

impl NavigationSignal {
    pub fn keystore_load() -> Self {
        Self {
            target_view: View::KeystoreLoad,
            window_scope: WindowScope::Primary,
            resizable: false,
        }
    }

    pub fn keystore_details() -> Self {
        Self {
            target_view: View::KeystoreDetails,
            window_scope: WindowScope::Primary,
            resizable: false,
        }
    }

    pub fn entry_detail() -> Self {
        Self {
            target_view: View::EntryDetail,
            window_scope: WindowScope::Secondary,
            resizable: true,
        }
    }
}

impl From<&LoadOutcome> for NavigationSignal {
    fn from(_: &LoadOutcome) -> Self {
        Self::keystore_details()
    }
}

impl From<&MutationOutcome> for NavigationSignal {
    fn from(_: &MutationOutcome) -> Self {
        Self::keystore_details()
    }
}

impl From<&EntryDetail> for NavigationSignal {
    fn from(_: &EntryDetail) -> Self {
        Self::entry_detail()
    }
}
