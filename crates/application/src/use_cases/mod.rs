mod lookup_icon;
mod lookup_status;
mod send_vote;

pub use lookup_icon::LookupIconUseCase;
pub use lookup_status::{LookupSettings, LookupStatusUseCase};
pub use send_vote::SendVoteUseCase;
