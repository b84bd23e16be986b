//! Immutable, ordered collections of 2D polygons or polylines, each element
//! carrying its own attribute dictionary, for building laser-cut and plotted
//! drawings out of reusable parts.
//!
//! Every operation returns a new [`Group`]; the input is never touched, so one
//! base drawing can feed any number of derived drawings. Boolean operations,
//! buffering and predicates run on the [`geo`] kernel, while this crate keeps
//! element `i` and its attributes together however many fragments an
//! operation produces.
//!
//! # Features
//! #### Default
//! - **svg-io**: render groups to SVG via the `svg` crate
//! - **offset**: buffer polygon groups with `geo-buf` and stroke polylines into outlines
//!
//! # Example
//! ```
//! use shart::{Group, Transform2D};
//!
//! let base: Group<String> = Group::rect(0.0, 0.0, 10.0, 10.0).add_attribute("stroke", "red".into());
//! let both = base.add(&base.translate(20.0, 0.0)).unwrap();
//! assert_eq!(both.len(), 2);
//! assert_eq!(both.attributes(1)["stroke"], "red");
//! ```

#![forbid(unsafe_code)]
#![warn(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod attributes;
pub mod coordinates;
pub mod errors;
pub mod float_types;
pub mod group;
pub mod io;
pub mod traits;
pub mod utils;

pub use attributes::{AttributeStore, AttributeStoreBuilder, Attributes};
pub use coordinates::Coordinates;
pub use errors::GroupError;
pub use group::{Element, Elements, Group, Kind};
pub use traits::{Origin, Transform2D};

#[cfg(feature = "offset")]
pub use group::offset::{CapStyle, JoinStyle};

#[cfg(feature = "svg-io")]
pub use io::svg::{SvgOptions, ToSVG};
