//! Ledger data model: amounts, errors, events, metadata and the state traits
//! the transition logic reads from and commits to.

use ink::prelude::string::String;

/// Amount in the asset's smallest unit. Same width as ink!'s default `Balance`.
pub type Amount = u128;

pub type Result<T> = core::result::Result<T, Error>;

// -------- configuration --------

pub const DECIMALS: u8 = 18;

pub const CNT_NAME: &str = "CryptionNetworkToken";
pub const CNT_SYMBOL: &str = "CNT";

/// 100 million whole tokens.
pub const CNT_INITIAL_SUPPLY: Amount = 100_000_000 * 10u128.pow(DECIMALS as u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: String, symbol: String) -> Self {
        Self { name, symbol, decimals: DECIMALS }
    }

    pub fn cnt() -> Self {
        Self::new(String::from(CNT_NAME), String::from(CNT_SYMBOL))
    }
}

// -------- errors --------

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    InsufficientBalance,
    InsufficientAllowance,
    NotOwner,
    Overflow,
}

impl Error {
    /// Revert string callers match on.
    pub fn message(&self) -> &'static str {
        match self {
            Error::InsufficientBalance => "ERC20: transfer amount exceeds balance",
            Error::InsufficientAllowance => "ERC20: insufficient allowance",
            Error::NotOwner => "Ownable: caller is not the owner",
            Error::Overflow => "ERC20: amount overflows supply",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

// -------- events --------

/// Notification produced by every committed transition. The contract maps
/// each variant onto its ink! event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent<A> {
    Transferred { from_acc: A, to_acc: A, amount_val: Amount },
    Approved { owner_acc: A, spender_acc: A, amount_val: Amount },
    Minted { to_acc: A, amount_val: Amount },
    Burned { from_acc: A, amount_val: Amount },
    OwnershipTransferred { previous_acc: Option<A>, new_acc: Option<A> },
}

// -------- state --------

/// Read side of the ledger. Absent entries read as zero.
pub trait LedgerView<A> {
    fn read_balance(&self, acc: &A) -> Amount;
    fn read_allowance(&self, owner_acc: &A, spender_acc: &A) -> Amount;
    fn read_owner(&self) -> Option<A>;
    fn read_total_supply(&self) -> Amount;
}

/// Write side. Only `Transition::commit` calls these.
pub trait LedgerStore<A>: LedgerView<A> {
    fn write_balance(&mut self, acc: &A, amount_val: Amount);
    fn write_allowance(&mut self, owner_acc: &A, spender_acc: &A, amount_val: Amount);
    fn write_owner(&mut self, owner_opt: Option<A>);
    fn write_total_supply(&mut self, amount_val: Amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_supply_is_one_hundred_million_tokens() {
        assert_eq!(CNT_INITIAL_SUPPLY, 100_000_000_000_000_000_000_000_000);
    }

    #[test]
    fn cnt_metadata_defaults() {
        let metadata = TokenMetadata::cnt();
        assert_eq!(metadata.name, "CryptionNetworkToken");
        assert_eq!(metadata.symbol, "CNT");
        assert_eq!(metadata.decimals, 18);
    }

    #[test]
    fn error_messages_match_revert_strings() {
        assert_eq!(
            Error::InsufficientBalance.message(),
            "ERC20: transfer amount exceeds balance"
        );
        assert_eq!(Error::NotOwner.message(), "Ownable: caller is not the owner");
        assert_eq!(
            ink::prelude::format!("{}", Error::InsufficientAllowance),
            "ERC20: insufficient allowance"
        );
    }
}
