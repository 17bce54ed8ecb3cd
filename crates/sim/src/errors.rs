use std::error;
use std::fmt;

/// Errors that can occur when constructing a disease model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A rate or probability parameter is outside [0.0, 1.0]
    InvalidRate(&'static str, f64),
    /// Latency must be at least one step
    InvalidLatency(u32),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidRate(name, val) => {
                write!(
                    f,
                    "Invalid rate for {name}: {val} (must be between 0.0 and 1.0)"
                )
            }
            ModelError::InvalidLatency(steps) => {
                write!(f, "Invalid latency: {steps} (must be at least 1 step)")
            }
        }
    }
}

impl error::Error for ModelError {}

/// Errors that can occur when constructing or generating an interaction matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Matrix rows do not form a square matrix
    NotSquare { rows: usize, row: usize, len: usize },
    /// A diagonal entry is not exactly 1.0
    NonUnitDiagonal { index: usize, value: f64 },
    /// An entry is not a finite number
    NonFiniteEntry { row: usize, col: usize },
    /// A generator parameter is outside its valid range
    InvalidSpec(&'static str, f64),
    /// A matrix needs at least one strain
    Empty,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::NotSquare { rows, row, len } => {
                write!(
                    f,
                    "Matrix is not square: {rows} rows but row {row} has {len} entries"
                )
            }
            MatrixError::NonUnitDiagonal { index, value } => {
                write!(f, "Diagonal entry ({index}, {index}) is {value} (must be 1.0)")
            }
            MatrixError::NonFiniteEntry { row, col } => {
                write!(f, "Entry ({row}, {col}) is not finite")
            }
            MatrixError::InvalidSpec(name, val) => {
                write!(f, "Invalid {name}: {val} (must be between 0.0 and 1.0)")
            }
            MatrixError::Empty => write!(f, "Interaction matrix needs at least one strain"),
        }
    }
}

impl error::Error for MatrixError {}

/// Errors that can occur when validating simulation parameters.
#[derive(Debug)]
pub enum ParameterError {
    /// No disease models were supplied
    NoStrains,
    /// Interaction matrix dimension does not match the number of strains
    DimensionMismatch { strains: usize, matrix: usize },
    /// Initial population tracks a different number of strains than the
    /// configured models
    PopulationMismatch { population: usize, parameters: usize },
    /// A demographic rate is outside its valid range
    InvalidRate(&'static str, f64),
    /// Combined background and disease mortality exceeds 1.0 for a strain
    MortalityBudget { strain: usize, total: f64 },
    /// The simulation horizon must cover at least one snapshot
    InvalidTimeSteps(usize),
    /// Age of maturity must be at least 1
    InvalidMaturityAge(u32),
    /// A disease model failed validation
    Model(ModelError),
    /// The interaction matrix failed validation
    Matrix(MatrixError),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NoStrains => write!(f, "At least one disease model is required"),
            ParameterError::DimensionMismatch { strains, matrix } => {
                write!(
                    f,
                    "Interaction matrix is {matrix}x{matrix} but {strains} strains are configured"
                )
            }
            ParameterError::PopulationMismatch { population, parameters } => {
                write!(
                    f,
                    "Initial population tracks {population} strains but parameters configure {parameters}"
                )
            }
            ParameterError::InvalidRate(name, val) => {
                write!(f, "Invalid {name}: {val}")
            }
            ParameterError::MortalityBudget { strain, total } => {
                write!(
                    f,
                    "Base mortality plus disease mortality for strain {strain} is {total} (must not exceed 1.0)"
                )
            }
            ParameterError::InvalidTimeSteps(steps) => {
                write!(f, "Invalid time steps: {steps} (must be at least 1)")
            }
            ParameterError::InvalidMaturityAge(age) => {
                write!(f, "Invalid age of maturity: {age} (must be at least 1)")
            }
            ParameterError::Model(e) => write!(f, "Disease model error: {e}"),
            ParameterError::Matrix(e) => write!(f, "Interaction matrix error: {e}"),
        }
    }
}

impl error::Error for ParameterError {}

impl From<ModelError> for ParameterError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<MatrixError> for ParameterError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

/// Errors that can occur during simulation building.
#[derive(Debug)]
pub enum BuilderError {
    /// A required parameter is missing
    MissingRequired(&'static str),
    /// An invalid parameter value was provided
    InvalidParameter(String),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(param) => {
                write!(f, "Missing required parameter: {param}")
            }
            Self::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {msg}")
            }
        }
    }
}

impl error::Error for BuilderError {}

impl From<ParameterError> for BuilderError {
    fn from(e: ParameterError) -> Self {
        Self::InvalidParameter(e.to_string())
    }
}
