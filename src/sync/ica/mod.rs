mod client;

pub use client::{AuthTicket, IcaClient, LISTS_PATH};
