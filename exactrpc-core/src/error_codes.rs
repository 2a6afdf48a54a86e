//! Stable numeric error-code catalog
//!
//! Every failure condition in the wider RPC client stack has a numeric code
//! that never changes once published. Codes are grouped into namespace
//! ranges, one per concern, and the catalog is append-only:
//!
//! - codes are never removed, reused or renumbered
//! - new codes go at the end of their range
//!
//! The transport and codec only produce a handful of these (see
//! [`crate::Error::code`]); the rest are carried so that logs and
//! cross-process reports from any layer agree on the numbers.
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::{ErrorCode, ErrorNamespace};
//!
//! let code = ErrorCode::RPC_TRANSPORT_HTTP_ERROR;
//! assert_eq!(code.as_u32(), 8_100_002);
//! assert_eq!(code.namespace(), ErrorNamespace::Rpc);
//! assert_eq!(code.name(), Some("RPC_TRANSPORT_HTTP_ERROR"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable error code from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u32);

/// Concern a code belongs to, derived from its numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorNamespace {
    /// Codes below 1000, predating the range scheme
    General,
    Addresses,
    Accounts,
    SubtleCrypto,
    Keys,
    Instructions,
    InstructionErrors,
    Signers,
    Transactions,
    TransactionErrors,
    Codecs,
    Rpc,
    RpcSubscriptions,
    /// Library bugs; should never reach an end user
    InvariantViolation,
    /// Outside every reserved range
    Unknown,
}

impl ErrorCode {
    /// Wrap a raw code. Unknown codes are allowed; `name()` returns `None`
    /// for them.
    pub const fn from_u32(code: u32) -> Self {
        ErrorCode(code)
    }

    /// The raw numeric code
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Namespace from the reserved range the code falls in
    pub fn namespace(self) -> ErrorNamespace {
        match self.0 {
            0..=999 => ErrorNamespace::General,
            2_800_000..=2_800_999 => ErrorNamespace::Addresses,
            3_230_000..=3_230_999 => ErrorNamespace::Accounts,
            3_610_000..=3_610_999 => ErrorNamespace::SubtleCrypto,
            3_704_000..=3_704_999 => ErrorNamespace::Keys,
            4_128_000..=4_128_999 => ErrorNamespace::Instructions,
            4_615_000..=4_615_999 => ErrorNamespace::InstructionErrors,
            5_508_000..=5_508_999 => ErrorNamespace::Signers,
            5_663_000..=5_663_999 => ErrorNamespace::Transactions,
            7_050_000..=7_050_999 => ErrorNamespace::TransactionErrors,
            8_078_000..=8_078_999 => ErrorNamespace::Codecs,
            8_100_000..=8_100_999 => ErrorNamespace::Rpc,
            8_190_000..=8_190_999 => ErrorNamespace::RpcSubscriptions,
            9_900_000..=9_900_999 => ErrorNamespace::InvariantViolation,
            _ => ErrorNamespace::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

macro_rules! error_codes {
    ($($name:ident = $value:literal,)*) => {
        impl ErrorCode {
            $(
                #[allow(missing_docs)]
                pub const $name: ErrorCode = ErrorCode($value);
            )*

            /// Every code in the catalog, in declaration order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// Symbolic name of a catalog code
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

error_codes! {
    // General
    BLOCK_HEIGHT_EXCEEDED = 5,
    INVALID_NONCE = 6,
    NONCE_ACCOUNT_NOT_FOUND = 7,
    BLOCKHASH_STRING_LENGTH_OUT_OF_RANGE = 48,
    INVALID_BLOCKHASH_BYTE_LENGTH = 49,
    LAMPORTS_OUT_OF_RANGE = 50,
    MALFORMED_BIGINT_STRING = 51,
    MALFORMED_NUMBER_STRING = 52,
    TIMESTAMP_OUT_OF_RANGE = 53,

    // Addresses [2_800_000..=2_800_999]
    ADDRESSES_INVALID_BYTE_LENGTH = 2_800_000,
    ADDRESSES_STRING_LENGTH_OUT_OF_RANGE = 2_800_001,
    ADDRESSES_INVALID_BASE58_ENCODED_ADDRESS = 2_800_002,
    ADDRESSES_INVALID_ED25519_PUBLIC_KEY = 2_800_003,
    ADDRESSES_MALFORMED_PDA = 2_800_004,
    ADDRESSES_PDA_BUMP_SEED_OUT_OF_RANGE = 2_800_005,
    ADDRESSES_MAX_NUMBER_OF_PDA_SEEDS_EXCEEDED = 2_800_006,
    ADDRESSES_MAX_PDA_SEED_LENGTH_EXCEEDED = 2_800_007,
    ADDRESSES_INVALID_SEEDS_POINT_ON_CURVE = 2_800_008,
    ADDRESSES_FAILED_TO_FIND_VIABLE_PDA_BUMP_SEED = 2_800_009,
    ADDRESSES_PDA_ENDS_WITH_PDA_MARKER = 2_800_010,

    // Accounts [3_230_000..=3_230_999]
    ACCOUNTS_ACCOUNT_NOT_FOUND = 3_230_001,
    // Eight digits, outside the accounts range. Kept for numeric stability.
    ACCOUNTS_ONE_OR_MORE_ACCOUNTS_NOT_FOUND = 32_300_002,
    ACCOUNTS_FAILED_TO_DECODE_ACCOUNT = 3_230_003,
    ACCOUNTS_EXPECTED_DECODED_ACCOUNT = 3_230_004,
    ACCOUNTS_EXPECTED_ALL_ACCOUNTS_TO_BE_DECODED = 3_230_005,

    // Subtle crypto [3_610_000..=3_610_999]
    SUBTLE_CRYPTO_MISSING = 3_610_000,
    SUBTLE_CRYPTO_DIGEST_MISSING = 3_610_001,
    SUBTLE_CRYPTO_ED25519_ALGORITHM_MISSING = 3_610_002,
    SUBTLE_CRYPTO_EXPORT_FUNCTION_MISSING = 3_610_003,
    SUBTLE_CRYPTO_GENERATE_FUNCTION_MISSING = 3_610_004,
    SUBTLE_CRYPTO_SIGN_FUNCTION_MISSING = 3_610_005,
    SUBTLE_CRYPTO_VERIFY_FUNCTION_MISSING = 3_610_006,

    // Keys [3_704_000..=3_704_999]
    KEYS_INVALID_KEY_PAIR_BYTE_LENGTH = 3_704_000,
    KEYS_INVALID_PRIVATE_KEY_BYTE_LENGTH = 3_704_001,
    KEYS_INVALID_SIGNATURE_BYTE_LENGTH = 3_704_002,
    KEYS_SIGNATURE_STRING_LENGTH_OUT_OF_RANGE = 3_704_003,

    // Instructions [4_128_000..=4_128_999]
    INSTRUCTION_EXPECTED_TO_HAVE_ACCOUNTS = 4_128_000,
    INSTRUCTION_EXPECTED_TO_HAVE_DATA = 4_128_001,
    INSTRUCTION_PROGRAM_ID_MISMATCH = 4_128_002,

    // Instruction errors reported by the RPC [4_615_000..=4_615_999]
    INSTRUCTION_ERROR_UNKNOWN = 4_615_000,
    INSTRUCTION_ERROR_GENERIC_ERROR = 4_615_001,
    INSTRUCTION_ERROR_INVALID_ARGUMENT = 4_615_002,
    INSTRUCTION_ERROR_INVALID_INSTRUCTION_DATA = 4_615_003,
    INSTRUCTION_ERROR_INVALID_ACCOUNT_DATA = 4_615_004,
    INSTRUCTION_ERROR_ACCOUNT_DATA_TOO_SMALL = 4_615_005,
    INSTRUCTION_ERROR_INSUFFICIENT_FUNDS = 4_615_006,
    INSTRUCTION_ERROR_INCORRECT_PROGRAM_ID = 4_615_007,
    INSTRUCTION_ERROR_MISSING_REQUIRED_SIGNATURE = 4_615_008,
    INSTRUCTION_ERROR_ACCOUNT_ALREADY_INITIALIZED = 4_615_009,
    INSTRUCTION_ERROR_UNINITIALIZED_ACCOUNT = 4_615_010,
    INSTRUCTION_ERROR_UNBALANCED_INSTRUCTION = 4_615_011,
    INSTRUCTION_ERROR_MODIFIED_PROGRAM_ID = 4_615_012,
    INSTRUCTION_ERROR_EXTERNAL_ACCOUNT_LAMPORT_SPEND = 4_615_013,
    INSTRUCTION_ERROR_EXTERNAL_ACCOUNT_DATA_MODIFIED = 4_615_014,
    INSTRUCTION_ERROR_READONLY_LAMPORT_CHANGE = 4_615_015,
    INSTRUCTION_ERROR_READONLY_DATA_MODIFIED = 4_615_016,
    INSTRUCTION_ERROR_DUPLICATE_ACCOUNT_INDEX = 4_615_017,
    INSTRUCTION_ERROR_EXECUTABLE_MODIFIED = 4_615_018,
    INSTRUCTION_ERROR_RENT_EPOCH_MODIFIED = 4_615_019,
    INSTRUCTION_ERROR_NOT_ENOUGH_ACCOUNT_KEYS = 4_615_020,
    INSTRUCTION_ERROR_ACCOUNT_DATA_SIZE_CHANGED = 4_615_021,
    INSTRUCTION_ERROR_ACCOUNT_NOT_EXECUTABLE = 4_615_022,
    INSTRUCTION_ERROR_ACCOUNT_BORROW_FAILED = 4_615_023,
    INSTRUCTION_ERROR_ACCOUNT_BORROW_OUTSTANDING = 4_615_024,
    INSTRUCTION_ERROR_DUPLICATE_ACCOUNT_OUT_OF_SYNC = 4_615_025,
    INSTRUCTION_ERROR_CUSTOM = 4_615_026,
    INSTRUCTION_ERROR_INVALID_ERROR = 4_615_027,
    INSTRUCTION_ERROR_EXECUTABLE_DATA_MODIFIED = 4_615_028,
    INSTRUCTION_ERROR_EXECUTABLE_LAMPORT_CHANGE = 4_615_029,
    INSTRUCTION_ERROR_EXECUTABLE_ACCOUNT_NOT_RENT_EXEMPT = 4_615_030,
    INSTRUCTION_ERROR_UNSUPPORTED_PROGRAM_ID = 4_615_031,
    INSTRUCTION_ERROR_CALL_DEPTH = 4_615_032,
    INSTRUCTION_ERROR_MISSING_ACCOUNT = 4_615_033,
    INSTRUCTION_ERROR_REENTRANCY_NOT_ALLOWED = 4_615_034,
    INSTRUCTION_ERROR_MAX_SEED_LENGTH_EXCEEDED = 4_615_035,
    INSTRUCTION_ERROR_INVALID_SEEDS = 4_615_036,
    INSTRUCTION_ERROR_INVALID_REALLOC = 4_615_037,
    INSTRUCTION_ERROR_COMPUTATIONAL_BUDGET_EXCEEDED = 4_615_038,
    INSTRUCTION_ERROR_PRIVILEGE_ESCALATION = 4_615_039,
    INSTRUCTION_ERROR_PROGRAM_ENVIRONMENT_SETUP_FAILURE = 4_615_040,
    INSTRUCTION_ERROR_PROGRAM_FAILED_TO_COMPLETE = 4_615_041,
    INSTRUCTION_ERROR_PROGRAM_FAILED_TO_COMPILE = 4_615_042,
    INSTRUCTION_ERROR_IMMUTABLE = 4_615_043,
    INSTRUCTION_ERROR_INCORRECT_AUTHORITY = 4_615_044,
    INSTRUCTION_ERROR_BORSH_IO_ERROR = 4_615_045,
    INSTRUCTION_ERROR_ACCOUNT_NOT_RENT_EXEMPT = 4_615_046,
    INSTRUCTION_ERROR_INVALID_ACCOUNT_OWNER = 4_615_047,
    INSTRUCTION_ERROR_ARITHMETIC_OVERFLOW = 4_615_048,
    INSTRUCTION_ERROR_UNSUPPORTED_SYSVAR = 4_615_049,
    INSTRUCTION_ERROR_ILLEGAL_OWNER = 4_615_050,
    INSTRUCTION_ERROR_MAX_ACCOUNTS_DATA_ALLOCATIONS_EXCEEDED = 4_615_051,
    INSTRUCTION_ERROR_MAX_ACCOUNTS_EXCEEDED = 4_615_052,
    INSTRUCTION_ERROR_MAX_INSTRUCTION_TRACE_LENGTH_EXCEEDED = 4_615_053,
    INSTRUCTION_ERROR_BUILTIN_PROGRAMS_MUST_CONSUME_COMPUTE_UNITS = 4_615_054,

    // Signers [5_508_000..=5_508_999]
    SIGNER_ADDRESS_CANNOT_HAVE_MULTIPLE_SIGNERS = 5_508_000,
    SIGNER_EXPECTED_KEY_PAIR_SIGNER = 5_508_001,
    SIGNER_EXPECTED_MESSAGE_SIGNER = 5_508_002,
    SIGNER_EXPECTED_MESSAGE_MODIFYING_SIGNER = 5_508_003,
    SIGNER_EXPECTED_MESSAGE_PARTIAL_SIGNER = 5_508_004,
    SIGNER_EXPECTED_TRANSACTION_SIGNER = 5_508_005,
    SIGNER_EXPECTED_TRANSACTION_MODIFYING_SIGNER = 5_508_006,
    SIGNER_EXPECTED_TRANSACTION_PARTIAL_SIGNER = 5_508_007,
    SIGNER_EXPECTED_TRANSACTION_SENDING_SIGNER = 5_508_008,
    SIGNER_TRANSACTION_CANNOT_HAVE_MULTIPLE_SENDING_SIGNERS = 5_508_009,
    SIGNER_TRANSACTION_SENDING_SIGNER_MISSING = 5_508_010,

    // Transactions [5_663_000..=5_663_999]
    TRANSACTION_INVOKED_PROGRAMS_CANNOT_PAY_FEES = 5_663_001,
    TRANSACTION_INVOKED_PROGRAMS_MUST_NOT_BE_WRITABLE = 5_663_002,
    TRANSACTION_EXPECTED_BLOCKHASH_LIFETIME = 5_663_003,
    TRANSACTION_EXPECTED_NONCE_LIFETIME = 5_663_004,
    TRANSACTION_VERSION_NUMBER_OUT_OF_RANGE = 5_663_005,
    TRANSACTION_FAILED_TO_DECOMPILE_ADDRESS_LOOKUP_TABLE_CONTENTS_MISSING = 5_663_006,
    TRANSACTION_FAILED_TO_DECOMPILE_ADDRESS_LOOKUP_TABLE_INDEX_OUT_OF_RANGE = 5_663_007,
    TRANSACTION_FAILED_TO_DECOMPILE_INSTRUCTION_PROGRAM_ADDRESS_NOT_FOUND = 5_663_008,
    TRANSACTION_FAILED_TO_DECOMPILE_FEE_PAYER_MISSING = 5_663_009,
    TRANSACTION_MISSING_SIGNATURES = 5_663_010,
    TRANSACTION_SIGNATURE_NOT_COMPUTABLE = 5_663_011,
    TRANSACTION_MISSING_ADDRESS = 5_663_012,
    TRANSACTION_MISSING_FEE_PAYER = 5_663_013,
    TRANSACTION_INVALID_NONCE_TRANSACTION_NO_INSTRUCTIONS = 5_663_014,
    TRANSACTION_INVALID_NONCE_TRANSACTION_FIRST_INSTRUCTION_NOT_ADVANCE_NONCE = 5_663_015,

    // Transaction errors reported by the RPC [7_050_000..=7_050_999]
    TRANSACTION_ERROR_UNKNOWN = 7_050_000,
    TRANSACTION_ERROR_ACCOUNT_IN_USE = 7_050_001,
    TRANSACTION_ERROR_ACCOUNT_LOADED_TWICE = 7_050_002,
    TRANSACTION_ERROR_ACCOUNT_NOT_FOUND = 7_050_003,
    TRANSACTION_ERROR_PROGRAM_ACCOUNT_NOT_FOUND = 7_050_004,
    TRANSACTION_ERROR_INSUFFICIENT_FUNDS_FOR_FEE = 7_050_005,
    TRANSACTION_ERROR_INVALID_ACCOUNT_FOR_FEE = 7_050_006,
    TRANSACTION_ERROR_ALREADY_PROCESSED = 7_050_007,
    TRANSACTION_ERROR_BLOCKHASH_NOT_FOUND = 7_050_008,
    TRANSACTION_ERROR_CALL_CHAIN_TOO_DEEP = 7_050_009,
    TRANSACTION_ERROR_MISSING_SIGNATURE_FOR_FEE = 7_050_010,
    TRANSACTION_ERROR_INVALID_ACCOUNT_INDEX = 7_050_011,
    TRANSACTION_ERROR_SIGNATURE_FAILURE = 7_050_012,
    TRANSACTION_ERROR_INVALID_PROGRAM_FOR_EXECUTION = 7_050_013,
    TRANSACTION_ERROR_SANITIZE_FAILURE = 7_050_014,
    TRANSACTION_ERROR_CLUSTER_MAINTENANCE = 7_050_015,
    TRANSACTION_ERROR_ACCOUNT_BORROW_OUTSTANDING = 7_050_016,
    TRANSACTION_ERROR_WOULD_EXCEED_MAX_BLOCK_COST_LIMIT = 7_050_017,
    TRANSACTION_ERROR_UNSUPPORTED_VERSION = 7_050_018,
    TRANSACTION_ERROR_INVALID_WRITABLE_ACCOUNT = 7_050_019,
    TRANSACTION_ERROR_WOULD_EXCEED_MAX_ACCOUNT_COST_LIMIT = 7_050_020,
    TRANSACTION_ERROR_WOULD_EXCEED_ACCOUNT_DATA_BLOCK_LIMIT = 7_050_021,
    TRANSACTION_ERROR_TOO_MANY_ACCOUNT_LOCKS = 7_050_022,
    TRANSACTION_ERROR_ADDRESS_LOOKUP_TABLE_NOT_FOUND = 7_050_023,
    TRANSACTION_ERROR_INVALID_ADDRESS_LOOKUP_TABLE_OWNER = 7_050_024,
    TRANSACTION_ERROR_INVALID_ADDRESS_LOOKUP_TABLE_DATA = 7_050_025,
    TRANSACTION_ERROR_INVALID_ADDRESS_LOOKUP_TABLE_INDEX = 7_050_026,
    TRANSACTION_ERROR_INVALID_RENT_PAYING_ACCOUNT = 7_050_027,
    TRANSACTION_ERROR_WOULD_EXCEED_MAX_VOTE_COST_LIMIT = 7_050_028,
    TRANSACTION_ERROR_WOULD_EXCEED_ACCOUNT_DATA_TOTAL_LIMIT = 7_050_029,
    TRANSACTION_ERROR_DUPLICATE_INSTRUCTION = 7_050_030,
    TRANSACTION_ERROR_INSUFFICIENT_FUNDS_FOR_RENT = 7_050_031,
    TRANSACTION_ERROR_MAX_LOADED_ACCOUNTS_DATA_SIZE_EXCEEDED = 7_050_032,
    TRANSACTION_ERROR_INVALID_LOADED_ACCOUNTS_DATA_SIZE_LIMIT = 7_050_033,
    TRANSACTION_ERROR_RESANITIZATION_NEEDED = 7_050_034,
    TRANSACTION_ERROR_PROGRAM_EXECUTION_TEMPORARILY_RESTRICTED = 7_050_035,
    TRANSACTION_ERROR_UNBALANCED_TRANSACTION = 7_050_036,

    // Codecs [8_078_000..=8_078_999]
    CODECS_CANNOT_DECODE_EMPTY_BYTE_ARRAY = 8_078_000,
    CODECS_WRONG_NUMBER_OF_BYTES = 8_078_001,
    CODECS_EXPECTED_FIXED_LENGTH_GOT_VARIABLE_LENGTH = 8_078_002,
    CODECS_EXPECTED_VARIABLE_LENGTH_GOT_FIXED_LENGTH = 8_078_003,
    CODECS_ENCODER_DECODER_SIZE_COMPATIBILITY_MISMATCH = 8_078_004,
    CODECS_FIXED_SIZE_ENCODER_DECODER_SIZE_MISMATCH = 8_078_005,
    CODECS_VARIABLE_SIZE_ENCODER_DECODER_MAX_SIZE_MISMATCH = 8_078_006,
    CODECS_WRONG_NUMBER_OF_ITEMS = 8_078_007,
    CODECS_ENUM_DISCRIMINATOR_OUT_OF_RANGE = 8_078_008,
    CODECS_INVALID_DATA_ENUM_VARIANT = 8_078_009,
    CODECS_INVALID_SCALAR_ENUM_VARIANT = 8_078_010,
    CODECS_NUMBER_OUT_OF_RANGE = 8_078_011,
    CODECS_INVALID_STRING_FOR_BASE = 8_078_012,

    // RPC [8_100_000..=8_100_999]
    RPC_INTEGER_OVERFLOW = 8_100_000,
    RPC_TRANSPORT_HEADER_FORBIDDEN = 8_100_001,
    RPC_TRANSPORT_HTTP_ERROR = 8_100_002,

    // RPC subscriptions [8_190_000..=8_190_999]
    RPC_SUBSCRIPTIONS_CANNOT_CREATE_SUBSCRIPTION_REQUEST = 8_190_000,
    RPC_SUBSCRIPTIONS_EXPECTED_SERVER_SUBSCRIPTION_ID = 8_190_001,
    RPC_SUBSCRIPTIONS_TRANSPORT_CLOSED_BEFORE_MESSAGE_BUFFERED = 8_190_002,
    RPC_SUBSCRIPTIONS_TRANSPORT_CONNECTION_CLOSED = 8_190_003,
    RPC_SUBSCRIPTIONS_TRANSPORT_FAILED_TO_CONNECT = 8_190_004,

    // Invariant violations [9_900_000..=9_900_999]
    INVARIANT_VIOLATION_WEBSOCKET_MESSAGE_ITERATOR_STATE_MISSING = 9_900_000,
    INVARIANT_VIOLATION_WEBSOCKET_MESSAGE_ITERATOR_MUST_NOT_POLL_BEFORE_RESOLVING_EXISTING_MESSAGE_PROMISE = 9_900_001,
    INVARIANT_VIOLATION_CACHED_ABORTABLE_ITERABLE_CACHE_ENTRY_MISSING = 9_900_002,
    INVARIANT_VIOLATION_SWITCH_MUST_BE_EXHAUSTIVE = 9_900_003,
}
