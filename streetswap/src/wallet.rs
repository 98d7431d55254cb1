use streetswap_eth::Address;

/// Connection state supplied by the external wallet library.
///
/// We never connect a wallet ourselves; the surrounding application
/// forwards whatever its wallet-connection capability reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected { account: Address },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            ConnectionStatus::Connected { account } => Some(*account),
            ConnectionStatus::Disconnected => None,
        }
    }
}
