use thiserror::Error;

/// Top-level error for a project run, classifying failures into those caused by the request
/// (malformed or incomplete input) and those that arise during the zone calculation itself.
#[derive(Debug, Error)]
pub enum RcSimError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Error identified during zone calculation: {0}")]
    FailureInCalculation(#[from] SimulationError),
    #[error("Error writing output: {0}")]
    ErrorInOutput(anyhow::Error),
}

impl RcSimError {
    /// Split an error surfaced through `anyhow` back out into a calculation failure where it
    /// originated in the calculation core.
    pub(crate) fn from_anyhow(error: anyhow::Error) -> Self {
        match error.downcast::<SimulationError>() {
            Ok(simulation_error) => Self::FailureInCalculation(simulation_error),
            Err(error) => Self::InvalidRequest(error),
        }
    }
}

/// Errors raised synchronously by the zone calculation core.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid zone configuration for {field}: {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
    #[error("Capacity restriction was requested for a timestep with no heating or cooling demand")]
    InvalidState,
    #[error(
        "Thermal network is degenerate: air temperature with reference heating ({temp_air_reference}) does not differ from free-floating air temperature ({temp_air_free})"
    )]
    DegenerateNetwork {
        temp_air_free: f64,
        temp_air_reference: f64,
    },
    #[error("Unsupported {kind} '{tag}'")]
    UnsupportedVariant { kind: VariantKind, tag: String },
}

impl SimulationError {
    pub(crate) fn invalid_configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum VariantKind {
    #[strum(to_string = "emission system")]
    EmissionSystem,
    #[strum(to_string = "supply system")]
    SupplySystem,
}
