//! Known-method classifier
//!
//! Decides whether a request belongs to the Solana JSON-RPC surface. Known
//! methods get the precision codec; anything else (third-party extensions
//! served from the same endpoint, for example) is treated as plain JSON.

use crate::envelope::RpcRequest;

/// Solana JSON-RPC method names, sorted for `binary_search`
static SOLANA_RPC_METHODS: &[&str] = &[
    "getAccountInfo",
    "getBalance",
    "getBlock",
    "getBlockCommitment",
    "getBlockHeight",
    "getBlockProduction",
    "getBlockTime",
    "getBlocks",
    "getBlocksWithLimit",
    "getClusterNodes",
    "getEpochInfo",
    "getEpochSchedule",
    "getFeeForMessage",
    "getFirstAvailableBlock",
    "getGenesisHash",
    "getHealth",
    "getHighestSnapshotSlot",
    "getIdentity",
    "getInflationGovernor",
    "getInflationRate",
    "getInflationReward",
    "getLargestAccounts",
    "getLatestBlockhash",
    "getLeaderSchedule",
    "getMaxRetransmitSlot",
    "getMaxShredInsertSlot",
    "getMinimumBalanceForRentExemption",
    "getMultipleAccounts",
    "getProgramAccounts",
    "getRecentPerformanceSamples",
    "getRecentPrioritizationFees",
    "getSignatureStatuses",
    "getSignaturesForAddress",
    "getSlot",
    "getSlotLeader",
    "getSlotLeaders",
    "getStakeMinimumDelegation",
    "getSupply",
    "getTokenAccountBalance",
    "getTokenAccountsByDelegate",
    "getTokenAccountsByOwner",
    "getTokenLargestAccounts",
    "getTokenSupply",
    "getTransaction",
    "getTransactionCount",
    "getVersion",
    "getVoteAccounts",
    "isBlockhashValid",
    "minimumLedgerSlot",
    "requestAirdrop",
    "sendTransaction",
    "simulateTransaction",
];

/// Whether `name` is a Solana JSON-RPC method (exact, case-sensitive)
pub fn is_known_method(name: &str) -> bool {
    SOLANA_RPC_METHODS.binary_search(&name).is_ok()
}

/// Whether a request targets a known method. `params` are never inspected.
pub fn is_known_request(request: &RpcRequest) -> bool {
    is_known_method(&request.method_name)
}
