//! Driving adapters that turn external requests into collection service
//! calls, keeping framework details at the edge.

pub mod http;
