#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod logic;
pub mod model;

#[ink::contract]
mod cnt {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    use crate::logic::{self, Transition};
    use crate::model::{LedgerEvent, LedgerStore, LedgerView, TokenMetadata, CNT_INITIAL_SUPPLY};
    pub use crate::model::{Error, Result};

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Burned {
        #[ink(topic)]
        from_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous_acc: Option<AccountId>,
        #[ink(topic)]
        new_acc: Option<AccountId>,
    }

    #[ink(storage)]
    pub struct Cnt {
        // metadata, fixed at construction
        name_str: String,
        symbol_str: String,
        decimals_u8: u8,

        // governance
        owner_acc: Option<AccountId>,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    impl Cnt {
        // -------- constructors --------

        /// Fixed-supply token: the whole CNT supply goes to `holder_acc` and
        /// nobody can mint afterwards.
        #[ink(constructor)]
        pub fn new(holder_acc: AccountId) -> Self {
            let mut token = Self::with_metadata(TokenMetadata::cnt(), None);
            let event = logic::genesis(&holder_acc, CNT_INITIAL_SUPPLY).commit(&mut token);
            token.emit(event);
            token
        }

        /// Starts empty; the deployer owns the token and issues supply with `mint`.
        #[ink(constructor)]
        pub fn new_mintable(name: String, symbol: String) -> Self {
            let owner_acc = Self::env().caller();
            let token = Self::with_metadata(TokenMetadata::new(name, symbol), Some(owner_acc));
            token.emit(LedgerEvent::OwnershipTransferred {
                previous_acc: None,
                new_acc: Some(owner_acc),
            });
            token
        }

        fn with_metadata(metadata: TokenMetadata, owner_acc: Option<AccountId>) -> Self {
            Self {
                name_str: metadata.name,
                symbol_str: metadata.symbol,
                decimals_u8: metadata.decimals,
                owner_acc,
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
            }
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name_str.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol_str.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals_u8
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.read_balance(&owner_acc)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.read_allowance(&owner_acc, &spender_acc)
        }

        /// `None` once ownership is renounced, and for fixed-supply tokens.
        #[ink(message)]
        pub fn owner(&self) -> Option<AccountId> {
            self.owner_acc
        }

        // -------- write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.execute(|view| logic::transfer(view, &from_acc, &to_acc, amount_val))
        }

        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.execute(|_| Ok(logic::approve(&owner_acc, &spender_acc, amount_val)))
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, add_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.execute(|view| logic::increase_allowance(view, &owner_acc, &spender_acc, add_val))
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, sub_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.execute(|view| logic::decrease_allowance(view, &owner_acc, &spender_acc, sub_val))
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            let spender_acc = self.env().caller();
            self.execute(|view| logic::transfer_from(view, &spender_acc, &from_acc, &to_acc, amount_val))
        }

        /// Owner-gated issuance.
        #[ink(message)]
        pub fn mint(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            self.execute(|view| logic::mint(view, &caller_acc, &to_acc, amount_val))
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            self.execute(|view| logic::burn(view, &caller_acc, amount_val))
        }

        #[ink(message)]
        pub fn burn_from(&mut self, from_acc: AccountId, amount_val: Balance) -> Result<()> {
            let spender_acc = self.env().caller();
            self.execute(|view| logic::burn_from(view, &spender_acc, &from_acc, amount_val))
        }

        // -------- governance --------

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner_acc: AccountId) -> Result<()> {
            let caller_acc = self.env().caller();
            self.execute(|view| logic::transfer_ownership(view, &caller_acc, &new_owner_acc))
        }

        #[ink(message)]
        pub fn renounce_ownership(&mut self) -> Result<()> {
            let caller_acc = self.env().caller();
            self.execute(|view| logic::renounce_ownership(view, &caller_acc))
        }

        // ---- internals ----

        /// Plans against the current state and commits only if planning passed.
        fn execute<F>(&mut self, plan: F) -> Result<()>
        where
            F: FnOnce(&Self) -> Result<Transition<AccountId>>,
        {
            let transition = plan(&*self).map_err(|err| {
                ink::env::debug_println!("cnt: rejected: {}", err);
                err
            })?;
            let event = transition.commit(self);
            self.emit(event);
            Ok(())
        }

        fn emit(&self, event: LedgerEvent<AccountId>) {
            match event {
                LedgerEvent::Transferred { from_acc, to_acc, amount_val } => {
                    self.env().emit_event(Transferred { from_acc, to_acc, amount_val })
                }
                LedgerEvent::Approved { owner_acc, spender_acc, amount_val } => {
                    self.env().emit_event(Approved { owner_acc, spender_acc, amount_val })
                }
                LedgerEvent::Minted { to_acc, amount_val } => {
                    self.env().emit_event(Minted { to_acc, amount_val })
                }
                LedgerEvent::Burned { from_acc, amount_val } => {
                    self.env().emit_event(Burned { from_acc, amount_val })
                }
                LedgerEvent::OwnershipTransferred { previous_acc, new_acc } => {
                    self.env().emit_event(OwnershipTransferred { previous_acc, new_acc })
                }
            }
        }
    }

    impl LedgerView<AccountId> for Cnt {
        fn read_balance(&self, acc: &AccountId) -> Balance {
            self.balances.get(acc).unwrap_or(0)
        }

        fn read_allowance(&self, owner_acc: &AccountId, spender_acc: &AccountId) -> Balance {
            self.allowances.get(&(*owner_acc, *spender_acc)).unwrap_or(0)
        }

        fn read_owner(&self) -> Option<AccountId> {
            self.owner_acc
        }

        fn read_total_supply(&self) -> Balance {
            self.total_supply
        }
    }

    impl LedgerStore<AccountId> for Cnt {
        fn write_balance(&mut self, acc: &AccountId, amount_val: Balance) {
            self.balances.insert(acc, &amount_val);
        }

        fn write_allowance(&mut self, owner_acc: &AccountId, spender_acc: &AccountId, amount_val: Balance) {
            self.allowances.insert(&(*owner_acc, *spender_acc), &amount_val);
        }

        fn write_owner(&mut self, owner_opt: Option<AccountId>) {
            self.owner_acc = owner_opt;
        }

        fn write_total_supply(&mut self, amount_val: Balance) {
            self.total_supply = amount_val;
        }
    }


}
