//! Mock implementation of the alert backend for testing.

mod provider;

use alertdesk_core::AlertService;
pub use provider::{Endpoint, MockAlertProvider, MockCall};

/// Creates an [`AlertService`] backed by the given mock.
///
/// The mock is cloned into the service; the caller's handle shares the same
/// call log and settings.
pub fn create_mock_service(provider: &MockAlertProvider) -> AlertService {
    AlertService::new(provider.clone())
}
