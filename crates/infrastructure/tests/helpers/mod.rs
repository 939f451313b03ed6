pub mod dns_server_mock;
pub mod minecraft_server_mock;
