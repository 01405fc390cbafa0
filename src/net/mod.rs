pub mod response;
pub mod routes;
pub mod rpc;
pub mod stdio;
