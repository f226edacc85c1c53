// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// modifications are permitted.

//! Hardfork identifiers for the Neo blockchain.

use std::fmt;

/// A named protocol upgrade that activates at a configured block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Hardfork {
    HfAspidochelone = 0,
    HfBasilisk = 1,
    HfCockatrice = 2,
    HfDomovoi = 3,
    HfEchidna = 4,
}

impl Hardfork {
    pub const ALL: [Hardfork; 5] = [
        Hardfork::HfAspidochelone,
        Hardfork::HfBasilisk,
        Hardfork::HfCockatrice,
        Hardfork::HfDomovoi,
        Hardfork::HfEchidna,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Hardfork::HfAspidochelone => "Aspidochelone",
            Hardfork::HfBasilisk => "Basilisk",
            Hardfork::HfCockatrice => "Cockatrice",
            Hardfork::HfDomovoi => "Domovoi",
            Hardfork::HfEchidna => "Echidna",
        }
    }
}

impl fmt::Display for Hardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_in_order() {
        assert_eq!(Hardfork::ALL.len(), 5);
        assert_eq!(Hardfork::ALL[0], Hardfork::HfAspidochelone);
        assert_eq!(Hardfork::ALL[4], Hardfork::HfEchidna);
    }

    #[test]
    fn display_uses_readable_name() {
        assert_eq!(Hardfork::HfBasilisk.to_string(), "Basilisk");
    }
}
