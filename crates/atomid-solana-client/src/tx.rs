//! Transaction plans: the ordered instruction list for one submission.

use atomid_core::config::COMPUTE_UNIT_LIMIT;
use serde::Serialize;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::compute_budget::ComputeBudgetInstruction;

#[derive(Debug, Clone)]
pub struct TxPlan {
    pub instructions: Vec<Instruction>,
}

impl TxPlan {
    /// A plan whose first instruction raises the compute unit limit.
    pub fn with_compute_budget(ix: Instruction) -> Self {
        Self {
            instructions: vec![
                ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
                ix,
            ],
        }
    }

    pub fn describe(&self) -> String {
        format!("{} instruction(s)", self.instructions.len())
    }

    /// Printable view of each instruction's program, accounts and data size.
    pub fn summary(&self) -> Vec<IxSummary> {
        self.instructions
            .iter()
            .map(|ix| IxSummary {
                program_id: ix.program_id.to_string(),
                accounts: ix
                    .accounts
                    .iter()
                    .map(|m| AccountSummary {
                        pubkey: m.pubkey.to_string(),
                        signer: m.is_signer,
                        writable: m.is_writable,
                    })
                    .collect(),
                data_len: ix.data.len(),
            })
            .collect()
    }

    pub fn signers(&self) -> Vec<Pubkey> {
        let mut out: Vec<Pubkey> = Vec::new();
        for meta in self.instructions.iter().flat_map(|ix| &ix.accounts) {
            if meta.is_signer && !out.contains(&meta.pubkey) {
                out.push(meta.pubkey);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IxSummary {
    pub program_id: String,
    pub accounts: Vec<AccountSummary>,
    pub data_len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub pubkey: String,
    pub signer: bool,
    pub writable: bool,
}
