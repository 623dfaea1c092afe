//! Client-side core: the session store, the role-based route guard, the
//! request repository, and the pure filter/sort/group pipeline.

pub mod guard;
pub mod pipeline;
pub mod repository;
pub mod session;
