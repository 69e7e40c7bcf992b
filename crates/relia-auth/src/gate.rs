//! Module access gate.
//!
//! A single boolean check performed before dispatching to any business
//! action that names a target module. The rule-set is selected by the
//! interpreter bound into the [`PermissionContext`]; the portal
//! allow-list is fixed at startup.

use relia_core::models::context::{Interpreter, PermissionContext};

use crate::error::AuthError;

/// Modules reachable through the consent-management variant.
const CONSENT_MODULES: &[&str] = &["Contacts", "Approvals", "ApprovalsRegister"];

#[derive(Debug, Clone)]
pub struct ModuleGate {
    /// Modules portal principals may reach.
    portal_modules: Vec<String>,
}

impl ModuleGate {
    pub fn new(portal_modules: Vec<String>) -> Self {
        Self { portal_modules }
    }

    /// Verify the principal may access `module`.
    pub fn check(&self, ctx: &PermissionContext, module: &str) -> Result<(), AuthError> {
        if self.allows(ctx, module) {
            Ok(())
        } else {
            Err(AuthError::ModuleDenied)
        }
    }

    fn allows(&self, ctx: &PermissionContext, module: &str) -> bool {
        match ctx.interpreter {
            Interpreter::Standard => true,
            Interpreter::Portal => self.portal_modules.iter().any(|m| m == module),
            Interpreter::Consents => CONSENT_MODULES.contains(&module),
        }
    }
}
