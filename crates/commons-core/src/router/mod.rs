// ── Client-side routing ──
//
// A static route table plus a guard that checks auth metadata before
// a navigation is allowed to proceed.

mod guard;
mod table;

pub use guard::{Navigation, Router};
pub use table::{Route, RouteMatch, RouteTable, View};
