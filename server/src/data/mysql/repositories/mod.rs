//! MySQL repositories
//!
//! Row types (StrainRow, NewStrain, ...) live in `crate::data::types`.

pub mod strain;

pub use strain::{
    create_strain, delete_strain, get_strain, list_by_condition, list_strains, update_strain,
};
