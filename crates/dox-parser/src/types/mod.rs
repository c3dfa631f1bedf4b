//! Documentation object model reconstructed from Doxygen XML.

mod description;
mod location;
mod object;
mod parameter;

pub use description::{Description, ParameterDirection};
pub use location::Location;
pub use object::{
    Compound, CompoundType, Define, DoxygenObject, Enum, EnumValue, Function, ObjectKind,
    RefContext, Variable,
};
pub use parameter::Parameter;
