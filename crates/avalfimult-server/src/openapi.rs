//! OpenAPI document served at `/openapi.json`

use serde_json::{json, Value};

/// Build the OpenAPI 3 description of the public routes
pub fn document() -> Value {
    let number_param = |name: &str, description: &str| {
        json!({
            "name": name,
            "in": "query",
            "required": true,
            "description": description,
            "schema": { "type": "string", "pattern": r"^(\d+\.?\d*|\.\d+)$" }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "API AvalFIMult",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Avaliação de Viabilidade de Investimento em Fundos Multimercado"
        },
        "tags": [
            { "name": "AvalFIMult", "description": "Viability scoring of multi-market fund allocations" },
            { "name": "Documentation", "description": "API documentation" }
        ],
        "paths": {
            "/avalfimult": {
                "get": {
                    "tags": ["AvalFIMult"],
                    "summary": "Score fund indicators into a viability verdict",
                    "parameters": [
                        number_param("resgate", "Redemption amount"),
                        number_param("capta", "Capital inflow amount"),
                        number_param("patliq", "Net equity; must be >= 1,000,000"),
                        number_param("pattotal", "Total equity")
                    ],
                    "responses": {
                        "200": {
                            "description": "\"Viable\" / \"Not Viable\", or the raw label \"1\" / \"0\" in label mode",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        },
                        "400": { "description": "A parameter is missing or not a non-negative decimal" },
                        "422": { "description": "Net equity below the floor" },
                        "500": { "description": "The classifier returned a label outside {0, 1}" }
                    }
                }
            },
            "/doc": {
                "get": {
                    "tags": ["Documentation"],
                    "summary": "Redirect to the external project documentation",
                    "responses": { "303": { "description": "Redirect" } }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness probe",
                    "responses": { "200": { "description": "OK" } }
                }
            }
        }
    })
}
