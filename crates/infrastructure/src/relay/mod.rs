mod dispatcher;

pub use dispatcher::UdpRelayDispatcher;
