//! Constants
//!
//! TigerStyle: limits and defaults live in one place, named with units.

/// First id handed out after the table is created or reset.
pub const POST_ID_FIRST: i32 = 1;

/// Default size of the Postgres connection pool.
pub const POSTGRES_CONNECTIONS_COUNT_MAX_DEFAULT: u32 = 10;
