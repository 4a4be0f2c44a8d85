//! Per-request tenant scope.
//!
//! Every core operation is scoped to the calling tenant. The scope is a
//! small immutable value passed explicitly through every call, never a
//! process-wide or thread-local variable, so concurrent requests cannot
//! leak tenant context into each other.

use tallybook_shared::types::TenantId;

/// Immutable request context carrying the caller's tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    /// Creates a context for the given tenant.
    #[must_use]
    pub const fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    /// Returns the tenant this request is scoped to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
