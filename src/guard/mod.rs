//! Output size enforcement

mod size_guard;

pub use self::size_guard::SizeGuard;
