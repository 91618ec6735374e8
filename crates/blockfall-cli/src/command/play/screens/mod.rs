pub use self::{game_over::*, name_entry::*, playing::*};

mod game_over;
mod name_entry;
mod playing;
