//! User-facing messages.
//!
//! The backend and its users speak Spanish, so every fallback shown to a
//! person is kept here in one place.

pub const CONNECTION_ERROR: &str = "Error de conexión";
pub const SESSION_MISSING: &str = "No hay sesión activa";
pub const SESSION_EXPIRED: &str = "Tu sesión ha expirado. Por favor, inicia sesión nuevamente.";
pub const STORAGE_ERROR: &str = "Error al guardar la sesión";
pub const FILE_READ_ERROR: &str = "Error al leer el archivo";

// Per-operation fallbacks, used when the backend sends no `message`.
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const REGISTER_FAILED: &str = "Error al registrar usuario";
pub const PROFILE_LOAD_FAILED: &str = "Error al cargar perfil";
pub const PROFILE_UPDATE_FAILED: &str = "Error al actualizar perfil";
pub const PASSWORD_CHANGE_FAILED: &str = "Error al cambiar contraseña";

pub const SEND_MESSAGE_FAILED: &str = "Error al enviar mensaje";
pub const CONVERSATIONS_LOAD_FAILED: &str = "Error al cargar conversaciones";
pub const CONVERSATION_LOAD_FAILED: &str = "Error al cargar conversación";
pub const CONVERSATION_RENAME_FAILED: &str = "Error al renombrar conversación";
pub const CONVERSATION_CATEGORY_FAILED: &str = "Error al actualizar categoría";
pub const CONVERSATION_DELETE_FAILED: &str = "Error al eliminar conversación";
pub const CONVERSATION_SEARCH_FAILED: &str = "Error al buscar conversaciones";
pub const CONVERSATION_RATE_FAILED: &str = "Error al calificar conversación";

pub const USERS_LOAD_FAILED: &str = "Error al cargar usuarios";
pub const ANALYTICS_LOAD_FAILED: &str = "Error al cargar analíticas";
pub const DOCUMENT_UPLOAD_FAILED: &str = "Error al subir documento";

pub const RESOURCES_LOAD_FAILED: &str = "Error al cargar recursos";
pub const RESOURCE_LOAD_FAILED: &str = "Error al cargar recurso";
pub const RESOURCE_CREATE_FAILED: &str = "Error al crear recurso";
pub const RESOURCE_UPDATE_FAILED: &str = "Error al actualizar recurso";
pub const RESOURCE_DELETE_FAILED: &str = "Error al eliminar recurso";
pub const PDF_UPLOAD_FAILED: &str = "Error al procesar PDF";

pub const FEEDBACK_SUBMIT_FAILED: &str = "Error al enviar feedback";
pub const FEEDBACK_LOAD_FAILED: &str = "Error al cargar feedback";
pub const FEEDBACK_STATS_FAILED: &str = "Error al cargar estadísticas de feedback";
