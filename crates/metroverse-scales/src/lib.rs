//! Continuous scales for sizing chart marks
//!
//! Both scales map a numeric domain onto an output range. Domain endpoints
//! land exactly on range endpoints, and a degenerate domain maps every input
//! to the range midpoint.
//!
//! ```rust
//! use metroverse_scales::{ContinuousScale, Domain, LinearScale, Range, SymlogScale};
//!
//! let domain = Domain::new(10.0, 1000.0);
//! let linear = LinearScale::new(domain, Range::new(5.0, 15.0));
//! assert_eq!(linear.apply(10.0), 5.0);
//! assert_eq!(linear.apply(1000.0), 15.0);
//!
//! let log = SymlogScale::new(domain, Range::new(2.0, 8.5));
//! assert_eq!(log.apply(10.0), 2.0);
//! assert_eq!(log.apply(1000.0), 8.5);
//! // small values spread out, large values compress
//! assert!(log.apply(100.0) > 4.0);
//!
//! let flat = LinearScale::new(Domain::new(3.0, 3.0), Range::new(5.0, 15.0));
//! assert_eq!(flat.apply(42.0), 10.0);
//! ```

pub mod common;
pub mod linear;
pub mod symlog;

pub use common::{ContinuousScale, Domain, Range};
pub use linear::LinearScale;
pub use symlog::SymlogScale;
