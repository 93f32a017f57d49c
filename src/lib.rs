pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod figure;
pub mod finals;
pub mod finals_fetch;
pub mod http_client;
pub mod iso3;
pub mod lookup;
pub mod page;
pub mod server;
pub mod table_extract;
