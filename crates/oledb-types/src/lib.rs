//! # oledb-types
//!
//! OLE DB type codes and the small enumerations shared by parameter and
//! schema metadata.
//!
//! ## Type Mappings
//!
//! | `OleDbType` | OLE DB indicator | Code |
//! |-------------|------------------|------|
//! | `SmallInt` | `DBTYPE_I2` | 2 |
//! | `Integer` | `DBTYPE_I4` | 3 |
//! | `BigInt` | `DBTYPE_I8` | 20 |
//! | `Double` | `DBTYPE_R8` | 5 |
//! | `Boolean` | `DBTYPE_BOOL` | 11 |
//! | `Decimal` | `DBTYPE_DECIMAL` | 14 |
//! | `Guid` | `DBTYPE_GUID` | 72 |
//! | `VarWChar` | `DBTYPE_WSTR` (variable) | 202 |
//! | `DBTimeStamp` | `DBTYPE_DBTIMESTAMP` | 135 |
//!
//! The full list lives on [`OleDbType`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod direction;
pub mod error;
pub mod oledb_type;

pub use direction::{ParameterDirection, RowVersion};
pub use error::TypeError;
pub use oledb_type::OleDbType;
