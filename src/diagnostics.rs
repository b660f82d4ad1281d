// ABOUTME: Diagnostics accumulator for non-fatal warnings during reconciliation.
// ABOUTME: Collects warnings that shouldn't fail a run but should be shown to users.

/// Collects non-fatal warnings during a reconciliation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A declared field that is never sent to Marathon.
    pub fn ignored_field(field: &str) -> Self {
        Self {
            kind: WarningKind::IgnoredField,
            message: format!("{field} is set but not applied to the app definition"),
        }
    }

    /// A flattened docker_*/container_* option hidden by an explicit container.
    pub fn shadowed_container_option(field: &str) -> Self {
        Self {
            kind: WarningKind::ShadowedContainerOption,
            message: format!("{field} is ignored because an explicit container is defined"),
        }
    }

    /// The app was destroyed and recreated because of in-flight deployments.
    pub fn stuck_deployment(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::StuckDeployment,
            message: message.into(),
        }
    }

    /// The app to destroy did not exist.
    pub fn already_absent(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::AlreadyAbsent,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Field accepted in the definition but outside what gets merged.
    IgnoredField,
    /// Flattened container option ignored in favour of `container`.
    ShadowedContainerOption,
    /// Existing deployments were superseded by destroy-and-recreate.
    StuckDeployment,
    /// Destroy found nothing to delete.
    AlreadyAbsent,
}
