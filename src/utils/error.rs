use thiserror::Error;

/// Fallback shown when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error al procesar la solicitud";

#[derive(Error, Debug)]
pub enum CalcError {
    /// Non-success HTTP status. `message` is the backend `detail` or the generic fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {message}")]
    Decode { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown calculator: {id}")]
    UnknownCalculator { id: String },

    #[error("No projection available to export")]
    NoProjection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    /// The single human-readable message shown to the user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::Api { message, .. } => message.clone(),
            CalcError::Transport(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CalcError::Api { status, .. } if *status < 500 => ErrorSeverity::High,
            CalcError::Api { .. } | CalcError::Transport(_) => ErrorSeverity::Medium,
            CalcError::Decode { .. } | CalcError::Serialization(_) => ErrorSeverity::High,
            CalcError::UnknownCalculator { .. } | CalcError::NoProjection => ErrorSeverity::Low,
            CalcError::ConfigValidation { .. } | CalcError::InvalidConfigValue { .. } => {
                ErrorSeverity::Critical
            }
            CalcError::Io(_) | CalcError::Csv(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::Api { status, .. } if *status < 500 => "Revisa los datos del formulario",
            CalcError::Api { .. } => "El servidor falló; intenta de nuevo más tarde",
            CalcError::Transport(_) => "Verifica que el backend esté en ejecución y la URL base sea correcta",
            CalcError::Decode { .. } | CalcError::Serialization(_) => {
                "La respuesta del backend no coincide con el contrato esperado"
            }
            CalcError::ConfigValidation { .. } | CalcError::InvalidConfigValue { .. } => {
                "Corrige el archivo de configuración o los argumentos"
            }
            CalcError::UnknownCalculator { .. } => "Usa `autocalc calculators` para ver los identificadores",
            CalcError::NoProjection => "Calcula una proyección antes de exportar la curva",
            CalcError::Io(_) | CalcError::Csv(_) => "Verifica permisos y la ruta de salida",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
