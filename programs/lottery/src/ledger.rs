use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::errors::LotteryError;
use crate::utils::CONFIG_SEED;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenTransfer {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

/// Why a ledger refused a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerError {
    AllowanceExceeded(Pubkey),
    InsufficientBalance(Pubkey),
    UnknownAccount(Pubkey),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::AllowanceExceeded(holder) => write!(f, "allowance exceeded for {holder}"),
            LedgerError::InsufficientBalance(holder) => {
                write!(f, "insufficient balance for {holder}")
            }
            LedgerError::UnknownAccount(holder) => write!(f, "no token account for {holder}"),
        }
    }
}

impl From<LedgerError> for anchor_lang::error::Error {
    fn from(cause: LedgerError) -> Self {
        msg!("Ledger rejected transfer: {}", cause);
        error!(LotteryError::TransferFailed)
    }
}

/// Token ledger as seen by the lottery. The lottery is the spender of every
/// transfer; how a debit is authorised is up to the ledger.
pub trait TokenLedger {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64>;

    /// Whether `holder` has an account that can receive a payout.
    fn has_account(&self, holder: &Pubkey) -> bool;

    /// Applies every transfer or none of them.
    fn transfer_all(&mut self, transfers: &[TokenTransfer]) -> Result<()>;
}

// -------------------------
// SPL token ledger (CPI)
// -------------------------

#[derive(Debug, PartialEq, Eq)]
struct PlannedTransfer {
    from: usize,
    to: usize,
    // None = the config PDA signs
    signer: Option<usize>,
    amount: u64,
}

/// Ledger backed by the SPL token program.
///
/// Holders resolve to token accounts of `mint` among `accounts`: an account
/// whose address is the holder wins, otherwise the first one the holder owns.
/// A debit is signed by the config PDA when it owns or is delegate of the
/// source, or by the source owner when it signed the transaction.
pub struct SplLedger<'info> {
    token_program: AccountInfo<'info>,
    mint: Pubkey,
    authority: AccountInfo<'info>,
    authority_bump: u8,
    accounts: Vec<AccountInfo<'info>>,
}

impl<'info> SplLedger<'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        mint: Pubkey,
        authority: AccountInfo<'info>,
        authority_bump: u8,
        accounts: Vec<AccountInfo<'info>>,
    ) -> Self {
        Self {
            token_program,
            mint,
            authority,
            authority_bump,
            accounts,
        }
    }

    fn load(&self, info: &AccountInfo<'info>) -> Option<TokenAccount> {
        if *info.owner != token::ID {
            return None;
        }
        let data = info.try_borrow_data().ok()?;
        let account = TokenAccount::try_deserialize(&mut &data[..]).ok()?;
        (account.mint == self.mint).then_some(account)
    }

    fn resolve(&self, holder: &Pubkey) -> std::result::Result<(usize, TokenAccount), LedgerError> {
        let by_address = self.accounts.iter().enumerate().find_map(|(i, info)| {
            if info.key == holder {
                self.load(info).map(|account| (i, account))
            } else {
                None
            }
        });

        by_address
            .or_else(|| {
                self.accounts.iter().enumerate().find_map(|(i, info)| {
                    self.load(info)
                        .filter(|account| account.owner == *holder)
                        .map(|account| (i, account))
                })
            })
            .ok_or(LedgerError::UnknownAccount(*holder))
    }

    fn plan(
        &self,
        transfers: &[TokenTransfer],
    ) -> std::result::Result<Vec<PlannedTransfer>, LedgerError> {
        let authority = *self.authority.key;
        let mut debits: BTreeMap<usize, u64> = BTreeMap::new();
        let mut planned = Vec::with_capacity(transfers.len());

        for t in transfers.iter().filter(|t| t.amount > 0) {
            let (from, source) = self.resolve(&t.from)?;
            let (to, _) = self.resolve(&t.to)?;

            let debit = debits.entry(from).or_default();
            // a debit past u64::MAX exceeds any balance
            *debit = debit
                .checked_add(t.amount)
                .ok_or(LedgerError::InsufficientBalance(t.from))?;
            if source.amount < *debit {
                return Err(LedgerError::InsufficientBalance(t.from));
            }

            let signer = if source.owner == authority {
                None
            } else if let Some(i) = self
                .accounts
                .iter()
                .position(|info| *info.key == source.owner && info.is_signer)
            {
                Some(i)
            } else if matches!(source.delegate, COption::Some(delegate) if delegate == authority) {
                if source.delegated_amount < *debit {
                    return Err(LedgerError::AllowanceExceeded(t.from));
                }
                None
            } else {
                return Err(LedgerError::AllowanceExceeded(t.from));
            };

            planned.push(PlannedTransfer {
                from,
                to,
                signer,
                amount: t.amount,
            });
        }

        Ok(planned)
    }
}

impl<'info> TokenLedger for SplLedger<'info> {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
        let (_, account) = self.resolve(holder)?;
        Ok(account.amount)
    }

    fn has_account(&self, holder: &Pubkey) -> bool {
        self.resolve(holder).is_ok()
    }

    fn transfer_all(&mut self, transfers: &[TokenTransfer]) -> Result<()> {
        // every check runs before the first CPI
        let planned = self.plan(transfers)?;

        let bump = [self.authority_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &bump]];

        for step in planned {
            let accounts = Transfer {
                from: self.accounts[step.from].clone(),
                to: self.accounts[step.to].clone(),
                authority: match step.signer {
                    Some(i) => self.accounts[i].clone(),
                    None => self.authority.clone(),
                },
            };

            let cpi = match step.signer {
                Some(_) => CpiContext::new(self.token_program.clone(), accounts),
                None => CpiContext::new_with_signer(
                    self.token_program.clone(),
                    accounts,
                    signer_seeds,
                ),
            };
            token::transfer(cpi, step.amount)?;
        }

        Ok(())
    }
}

// -------------------------
// In-memory ledger
// -------------------------

/// Ledger kept in memory, with ERC-20 style allowances granted to the lottery.
/// Holders registered with `custody` are controlled by the lottery directly.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<Pubkey, u64>,
    allowances: BTreeMap<Pubkey, u64>,
    custody: BTreeSet<Pubkey>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, holder: Pubkey, amount: u64) {
        let balance = self.balances.entry(holder).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Sets the allowance `holder` grants the lottery. `u64::MAX` never runs down.
    pub fn approve(&mut self, holder: Pubkey, amount: u64) {
        self.allowances.insert(holder, amount);
    }

    pub fn custody(&mut self, holder: Pubkey) {
        self.custody.insert(holder);
    }

    pub fn allowance(&self, holder: &Pubkey) -> u64 {
        self.allowances.get(holder).copied().unwrap_or(0)
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
        Ok(self.balances.get(holder).copied().unwrap_or(0))
    }

    // any holder can be credited
    fn has_account(&self, _holder: &Pubkey) -> bool {
        true
    }

    fn transfer_all(&mut self, transfers: &[TokenTransfer]) -> Result<()> {
        let mut balances = self.balances.clone();
        let mut allowances = self.allowances.clone();

        for t in transfers {
            if !self.custody.contains(&t.from) {
                let allowance = allowances.entry(t.from).or_default();
                if *allowance < t.amount {
                    return Err(LedgerError::AllowanceExceeded(t.from).into());
                }
                if *allowance != u64::MAX {
                    *allowance -= t.amount;
                }
            }

            let source = balances.entry(t.from).or_default();
            if *source < t.amount {
                return Err(LedgerError::InsufficientBalance(t.from).into());
            }
            *source -= t.amount;

            let target = balances.entry(t.to).or_default();
            *target = target.checked_add(t.amount).ok_or(LotteryError::MathOverflow)?;
        }

        self.balances = balances;
        self.allowances = allowances;
        Ok(())
    }
}
