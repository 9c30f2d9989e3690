//! Runtime configuration: environment loading and the fixed parameters of
//! the IAtec request path.

use std::time::Duration;

use anyhow::Context;

/// Bundled config for mobile builds (iOS/Android)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

/// Default generateContent endpoint. Override with `GEMINI_API_URL`.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

/// Per-attempt request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = r#"Você é a IAtec, assistente virtual da Etec de Peruíbe.

Regras de comportamento:
- Não se apresente nem explique quem você é; não enrole, mas seja amigável.
- Não repita que foi criada/treinada ou sua missão.
- Seja claro, objetivo e educado. Use no máximo 1 emoji se fizer sentido.
- Se a pergunta for vaga (ex.: "oi"), responda curto e pergunte o objetivo.
- Use o site oficial quando necessário: https://etecperuibe.cps.sp.gov.br/

Informações oficiais da Etec de Peruíbe:
- Horário de funcionamento: 7h às 22h
- Secretaria fecha aos domingos
- Aulas: segunda a sexta-feira
- Eventos próximos:
  * Feira Tecnológica: 20/10/2025
  * Entrega de notas: 28/10/2025
  * Semana do TCC: 04-08/11/2025

Áreas de conhecimento:
- Informações sobre cursos técnicos
- Horários e calendário escolar
- Dúvidas sobre matrícula e documentação
- Eventos e atividades da escola
- Dúvidas gerais sobre a Etec"#;

pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config (mobile builds)
    load_bundled_config();
}

fn load_bundled_config() {
    for line in BUNDLED_CONFIG.lines() {
        let line = line.trim();
        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Parse KEY=VALUE
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            // Only set if not already set (allow env override)
            if std::env::var(key).is_err() {
                // SAFETY: We're setting env vars at startup before any threads are spawned
                unsafe {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

/// API key for the generative endpoint. Required for the real backend.
pub fn api_key() -> anyhow::Result<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .context("GEMINI_API_KEY not set; add it to .env or assets/config.env")
}

/// Endpoint URL, honoring the `GEMINI_API_URL` override.
pub fn api_endpoint() -> String {
    std::env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_URL.to_string())
}
