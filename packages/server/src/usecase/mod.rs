//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod messages;
pub mod room_relay;
pub mod rooms;

pub use error::{MessageUseCaseError, RoomUseCaseError};
pub use messages::MessageUseCase;
pub use room_relay::{RelayReport, RelaySnapshot, RoomRelay};
pub use rooms::{NewRoom, RoomUseCase};
