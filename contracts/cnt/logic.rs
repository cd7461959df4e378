//! Ledger transitions.
//!
//! Every mutating operation is planned against a read-only [`LedgerView`]:
//! all checks run and every new value is computed before anything is
//! written. The resulting [`Transition`] is then committed in one step, so a
//! rejected call never leaves a partial write behind.

use crate::model::{Amount, Error, LedgerEvent, LedgerStore, LedgerView, Result};

/// The complete set of writes one operation performs, plus its event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition<A> {
    balance_writes: [Option<(A, Amount)>; 2],
    allowance_write: Option<(A, A, Amount)>,
    owner_write: Option<Option<A>>,
    supply_write: Option<Amount>,
    event: LedgerEvent<A>,
}

impl<A> Transition<A> {
    fn new(event: LedgerEvent<A>) -> Self {
        Self {
            balance_writes: [None, None],
            allowance_write: None,
            owner_write: None,
            supply_write: None,
            event,
        }
    }

    pub fn event(&self) -> &LedgerEvent<A> {
        &self.event
    }

    /// Apply every planned write and hand back the event to emit.
    pub fn commit<S: LedgerStore<A> + ?Sized>(self, store: &mut S) -> LedgerEvent<A> {
        for (acc, amount_val) in self.balance_writes.into_iter().flatten() {
            store.write_balance(&acc, amount_val);
        }
        if let Some((owner_acc, spender_acc, amount_val)) = self.allowance_write {
            store.write_allowance(&owner_acc, &spender_acc, amount_val);
        }
        if let Some(owner_opt) = self.owner_write {
            store.write_owner(owner_opt);
        }
        if let Some(supply_val) = self.supply_write {
            store.write_total_supply(supply_val);
        }
        self.event
    }
}

// -------- guards / arithmetic --------

fn only_owner<A, V>(view: &V, caller_acc: &A) -> Result<()>
where
    A: PartialEq,
    V: LedgerView<A> + ?Sized,
{
    match view.read_owner() {
        Some(owner_acc) if owner_acc == *caller_acc => Ok(()),
        _ => Err(Error::NotOwner),
    }
}

fn debit<A, V>(view: &V, acc: &A, amount_val: Amount) -> Result<Amount>
where
    V: LedgerView<A> + ?Sized,
{
    view.read_balance(acc)
        .checked_sub(amount_val)
        .ok_or(Error::InsufficientBalance)
}

fn spend_allowance<A, V>(view: &V, owner_acc: &A, spender_acc: &A, amount_val: Amount) -> Result<Amount>
where
    V: LedgerView<A> + ?Sized,
{
    view.read_allowance(owner_acc, spender_acc)
        .checked_sub(amount_val)
        .ok_or(Error::InsufficientAllowance)
}

/// Balance writes for moving `amount_val` between two accounts. A self-move
/// still has to pass the sufficiency check but writes nothing.
fn plan_move<A, V>(
    view: &V,
    from_acc: &A,
    to_acc: &A,
    amount_val: Amount,
) -> Result<[Option<(A, Amount)>; 2]>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    let new_from = debit(view, from_acc, amount_val)?;
    if from_acc == to_acc {
        return Ok([None, None])
    }
    let new_to = view
        .read_balance(to_acc)
        .checked_add(amount_val)
        .ok_or(Error::Overflow)?;
    Ok([Some((from_acc.clone(), new_from)), Some((to_acc.clone(), new_to))])
}

// -------- transfers --------

pub fn transfer<A, V>(view: &V, caller_acc: &A, to_acc: &A, amount_val: Amount) -> Result<Transition<A>>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    let balance_writes = plan_move(view, caller_acc, to_acc, amount_val)?;
    let mut transition = Transition::new(LedgerEvent::Transferred {
        from_acc: caller_acc.clone(),
        to_acc: to_acc.clone(),
        amount_val,
    });
    transition.balance_writes = balance_writes;
    Ok(transition)
}

/// Spender-initiated transfer. The balance check runs before the allowance
/// check, so a call failing both reports `InsufficientBalance`.
pub fn transfer_from<A, V>(
    view: &V,
    spender_acc: &A,
    from_acc: &A,
    to_acc: &A,
    amount_val: Amount,
) -> Result<Transition<A>>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    let balance_writes = plan_move(view, from_acc, to_acc, amount_val)?;
    let remaining_val = spend_allowance(view, from_acc, spender_acc, amount_val)?;

    let mut transition = Transition::new(LedgerEvent::Transferred {
        from_acc: from_acc.clone(),
        to_acc: to_acc.clone(),
        amount_val,
    });
    transition.balance_writes = balance_writes;
    transition.allowance_write = Some((from_acc.clone(), spender_acc.clone(), remaining_val));
    Ok(transition)
}

// -------- allowances --------

/// Overwrites the allowance. Zero revokes.
pub fn approve<A: Clone>(owner_acc: &A, spender_acc: &A, amount_val: Amount) -> Transition<A> {
    let mut transition = Transition::new(LedgerEvent::Approved {
        owner_acc: owner_acc.clone(),
        spender_acc: spender_acc.clone(),
        amount_val,
    });
    transition.allowance_write = Some((owner_acc.clone(), spender_acc.clone(), amount_val));
    transition
}

pub fn increase_allowance<A, V>(view: &V, owner_acc: &A, spender_acc: &A, added_val: Amount) -> Result<Transition<A>>
where
    A: Clone,
    V: LedgerView<A> + ?Sized,
{
    let new_val = view
        .read_allowance(owner_acc, spender_acc)
        .checked_add(added_val)
        .ok_or(Error::Overflow)?;
    Ok(approve(owner_acc, spender_acc, new_val))
}

pub fn decrease_allowance<A, V>(
    view: &V,
    owner_acc: &A,
    spender_acc: &A,
    subtracted_val: Amount,
) -> Result<Transition<A>>
where
    A: Clone,
    V: LedgerView<A> + ?Sized,
{
    let new_val = spend_allowance(view, owner_acc, spender_acc, subtracted_val)?;
    Ok(approve(owner_acc, spender_acc, new_val))
}

// -------- supply --------

/// Construction-time issuance onto an empty ledger. Not owner-gated.
pub fn genesis<A: Clone>(holder_acc: &A, amount_val: Amount) -> Transition<A> {
    let mut transition = Transition::new(LedgerEvent::Minted {
        to_acc: holder_acc.clone(),
        amount_val,
    });
    transition.balance_writes = [Some((holder_acc.clone(), amount_val)), None];
    transition.supply_write = Some(amount_val);
    transition
}

pub fn mint<A, V>(view: &V, caller_acc: &A, to_acc: &A, amount_val: Amount) -> Result<Transition<A>>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    only_owner(view, caller_acc)?;
    let new_supply = view
        .read_total_supply()
        .checked_add(amount_val)
        .ok_or(Error::Overflow)?;
    let new_to = view
        .read_balance(to_acc)
        .checked_add(amount_val)
        .ok_or(Error::Overflow)?;

    let mut transition = Transition::new(LedgerEvent::Minted {
        to_acc: to_acc.clone(),
        amount_val,
    });
    transition.balance_writes = [Some((to_acc.clone(), new_to)), None];
    transition.supply_write = Some(new_supply);
    Ok(transition)
}

pub fn burn<A, V>(view: &V, caller_acc: &A, amount_val: Amount) -> Result<Transition<A>>
where
    A: Clone,
    V: LedgerView<A> + ?Sized,
{
    let new_from = debit(view, caller_acc, amount_val)?;
    let new_supply = view
        .read_total_supply()
        .checked_sub(amount_val)
        .ok_or(Error::Overflow)?;

    let mut transition = Transition::new(LedgerEvent::Burned {
        from_acc: caller_acc.clone(),
        amount_val,
    });
    transition.balance_writes = [Some((caller_acc.clone(), new_from)), None];
    transition.supply_write = Some(new_supply);
    Ok(transition)
}

/// Burn out of `from_acc` using the caller's allowance. Same check order as
/// [`transfer_from`].
pub fn burn_from<A, V>(view: &V, spender_acc: &A, from_acc: &A, amount_val: Amount) -> Result<Transition<A>>
where
    A: Clone,
    V: LedgerView<A> + ?Sized,
{
    let mut transition = burn(view, from_acc, amount_val)?;
    let remaining_val = spend_allowance(view, from_acc, spender_acc, amount_val)?;
    transition.allowance_write = Some((from_acc.clone(), spender_acc.clone(), remaining_val));
    Ok(transition)
}

// -------- ownership --------

pub fn transfer_ownership<A, V>(view: &V, caller_acc: &A, new_owner_acc: &A) -> Result<Transition<A>>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    only_owner(view, caller_acc)?;
    let mut transition = Transition::new(LedgerEvent::OwnershipTransferred {
        previous_acc: Some(caller_acc.clone()),
        new_acc: Some(new_owner_acc.clone()),
    });
    transition.owner_write = Some(Some(new_owner_acc.clone()));
    Ok(transition)
}

/// Clears the owner for good. Nothing can mint afterwards.
pub fn renounce_ownership<A, V>(view: &V, caller_acc: &A) -> Result<Transition<A>>
where
    A: Clone + PartialEq,
    V: LedgerView<A> + ?Sized,
{
    only_owner(view, caller_acc)?;
    let mut transition = Transition::new(LedgerEvent::OwnershipTransferred {
        previous_acc: Some(caller_acc.clone()),
        new_acc: None,
    });
    transition.owner_write = Some(None);
    Ok(transition)
}
