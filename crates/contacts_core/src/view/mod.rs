//! Pure list projections over contact snapshots.

pub mod contact_list;
