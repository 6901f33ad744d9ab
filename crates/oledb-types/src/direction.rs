//! Parameter direction and source row version.

use std::fmt;

use crate::error::TypeError;

/// Direction of a command parameter relative to the procedure call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterDirection {
    /// Value flows from the caller to the provider.
    #[default]
    Input,
    /// Value flows from the provider back to the caller.
    Output,
    /// Value flows both ways.
    InputOutput,
    /// Procedure return status.
    ReturnValue,
}

impl ParameterDirection {
    /// Convert an OLE DB `DBPARAMTYPE` indicator.
    ///
    /// | Code | Meaning |
    /// |------|---------|
    /// | 1 | `DBPARAMTYPE_INPUT` |
    /// | 2 | `DBPARAMTYPE_INPUTOUTPUT` |
    /// | 3 | `DBPARAMTYPE_OUTPUT` |
    /// | 4 | `DBPARAMTYPE_RETURNVALUE` |
    pub fn from_param_type(code: u16) -> Result<Self, TypeError> {
        match code {
            1 => Ok(Self::Input),
            2 => Ok(Self::InputOutput),
            3 => Ok(Self::Output),
            4 => Ok(Self::ReturnValue),
            other => Err(TypeError::UnknownDirection(other)),
        }
    }

    /// Get the `DBPARAMTYPE` indicator for this direction.
    #[must_use]
    pub fn param_type(self) -> u16 {
        match self {
            Self::Input => 1,
            Self::InputOutput => 2,
            Self::Output => 3,
            Self::ReturnValue => 4,
        }
    }

    /// Whether the caller supplies a value for this parameter.
    #[must_use]
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::InputOutput)
    }

    /// Whether the provider writes a value back into this parameter.
    #[must_use]
    pub fn is_output(self) -> bool {
        matches!(self, Self::Output | Self::InputOutput | Self::ReturnValue)
    }
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "Input",
            Self::Output => "Output",
            Self::InputOutput => "InputOutput",
            Self::ReturnValue => "ReturnValue",
        };
        f.write_str(name)
    }
}

/// Which version of a row's column value a parameter binds to.
///
/// Generated `UPDATE` statements bind new values from the current version
/// and compare against the original version in the `WHERE` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowVersion {
    /// The value as currently edited.
    #[default]
    Current,
    /// The value as originally fetched.
    Original,
}

impl fmt::Display for RowVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("Current"),
            Self::Original => f.write_str("Original"),
        }
    }
}
