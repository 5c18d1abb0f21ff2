pub mod intersections;
pub mod matrix;
pub mod membership;

pub use intersections::{
    CategoryOrder, EMPTY_INTERSECTION_LABEL, Intersection, IntersectionFilter, IntersectionOrder,
    IntersectionTable, derive_intersections,
};
pub use matrix::{GridPoint, MembershipMatrix};
pub use membership::{MembershipMask, MembershipRow, MembershipTable};
