//! Taleweaver Shared - wire-format types for the HTTP/JSON boundary.
//!
//! Everything a client exchanges with the engine lives here:
//! - `requests` - inbound JSON bodies
//! - `responses` - outbound JSON bodies
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **Minimal dependencies** - serde plus domain vocabulary types
//! 3. **Stable field names** - these are what the browser client renders

pub mod requests;
pub mod responses;

pub use requests::{
    AddCharacterRequest, ChatRequest, CreateCharacterRequest, CreatePersonaRequest,
    CreateStoryRequest, DirectRequest, SetActiveRequest, SetSceneRequest, SuggestCharacterRequest,
    UpdatePersonaRequest,
};
pub use responses::{
    AckResponse, CharacterDto, ChatResponse, CharacterListResponse, DirectResponse,
    ErrorResponse, PersonaDto, PersonaListResponse, SceneResponse, SessionResponse,
    StoryListResponse, StorySummary, SuggestionResponse,
};
