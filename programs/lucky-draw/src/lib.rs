use anchor_lang::prelude::*;
use instructions::*;
use state::{ConfirmAction, MoveDirection};

#[cfg(not(target_os = "solana"))]
pub mod offchain;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod state;

declare_id!("AFYcVkuAdNLYeh1mZU99uYAFoqJnyLV6BbmfkysgNv8m");

#[program]
pub mod lucky_draw {
    use super::*;

    pub fn init_session(ctx: Context<InitSession>) -> Result<()> {
        instructions::init_session::init_session(ctx)
    }

    pub fn add_participants(ctx: Context<ManageSession>, names: Vec<String>) -> Result<()> {
        instructions::manage_roster::add_participants(ctx, names)
    }

    pub fn replace_roster(ctx: Context<ManageSession>, names: Vec<String>) -> Result<()> {
        instructions::manage_roster::replace_roster(ctx, names)
    }

    pub fn remove_participant(ctx: Context<ManageSession>, participant_id: u32) -> Result<()> {
        instructions::manage_roster::remove_participant(ctx, participant_id)
    }

    pub fn dedupe_roster(ctx: Context<ManageSession>) -> Result<()> {
        instructions::manage_roster::dedupe_roster(ctx)
    }

    pub fn add_prize(ctx: Context<ManageSession>, name: String, count: u32) -> Result<()> {
        instructions::manage_prizes::add_prize(ctx, name, count)
    }

    pub fn update_prize(
        ctx: Context<ManageSession>,
        prize_id: u32,
        name: Option<String>,
        count: Option<u32>,
    ) -> Result<()> {
        instructions::manage_prizes::update_prize(ctx, prize_id, name, count)
    }

    pub fn move_prize(
        ctx: Context<ManageSession>,
        prize_id: u32,
        direction: MoveDirection,
    ) -> Result<()> {
        instructions::manage_prizes::move_prize(ctx, prize_id, direction)
    }

    pub fn remove_prize(ctx: Context<ManageSession>, prize_id: u32) -> Result<()> {
        instructions::manage_prizes::remove_prize(ctx, prize_id)
    }

    pub fn set_allow_repeat(ctx: Context<ManageSession>, allow_repeat: bool) -> Result<()> {
        instructions::manage_session::set_allow_repeat(ctx, allow_repeat)
    }

    pub fn start_draw(ctx: Context<ManageSession>) -> Result<()> {
        instructions::start_draw::start_draw(ctx)
    }

    pub fn reveal_winner(ctx: Context<RevealWinner>) -> Result<()> {
        instructions::reveal_winner::reveal_winner(ctx)
    }

    pub fn request_confirmation(ctx: Context<ManageSession>, action: ConfirmAction) -> Result<()> {
        instructions::confirmation::request_confirmation(ctx, action)
    }

    pub fn confirm_pending(ctx: Context<ManageSession>, token: u64) -> Result<()> {
        instructions::confirmation::confirm_pending(ctx, token)
    }

    pub fn cancel_confirmation(ctx: Context<ManageSession>) -> Result<()> {
        instructions::confirmation::cancel_confirmation(ctx)
    }
}
