use anchor_lang::error_code;

#[error_code]
pub enum LuckyDrawError {
    Overflow,
    #[msg("Name must not be empty")]
    EmptyName,
    #[msg("Name exceeds the maximum length of 32 bytes")]
    NameTooLong,
    #[msg("The roster cannot hold more participants")]
    RosterFull,
    #[msg("The prize list cannot hold more prizes")]
    PrizeListFull,
    #[msg("A prize needs at least one winner")]
    InvalidPrizeCount,
    #[msg("No participant with this id")]
    ParticipantNotFound,
    #[msg("No prize with this id")]
    PrizeNotFound,
    #[msg("A draw is in progress")]
    DrawInProgress,
    #[msg("No draw is in progress")]
    NotSpinning,
    #[msg("The winner can only be revealed in a later slot than the draw started")]
    RevealTooEarly,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
    #[msg("Group size must be at least 2 and at most the roster size")]
    InvalidGroupSize,
    #[msg("Only the session authority can change this session")]
    NotSessionAuthority,
}
