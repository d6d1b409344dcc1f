//! HTTP server for the registry query API.
//!
//! Read-only surface over the converted registry file. Every request
//! reloads the file through [`OperatorStore::load`], so there is no shared
//! mutable state between requests.
//!
//! # API Endpoints
//!
//! | Method | Path                        | Description                          |
//! |--------|-----------------------------|--------------------------------------|
//! | GET    | `/`                         | Route map and usage examples         |
//! | GET    | `/todos`                    | Full listing with record count       |
//! | GET    | `/registro/{registro_ans}`  | Lookup by ANS registration code      |
//! | GET    | `/cnpj/{cnpj}`              | Lookup by tax ID                     |
//! | GET    | `/cidade/{cidade}`          | Lookup by city (case-insensitive)    |
//! | GET    | `/uf/{uf}`                  | Lookup by state (case-insensitive)   |
//! | GET    | `/modalidade/{modalidade}`  | Lookup by category (case-insensitive)|
//! | GET    | `/buscar`                   | Combined search via query params     |

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use super::types::{ApiError, TodosResponse};
use crate::models::Operator;
use crate::query::{self, SearchCriteria};
use crate::store::OperatorStore;

type SharedStore = Arc<OperatorStore>;

/// Build the application router around a store.
pub fn router(store: OperatorStore) -> Router {
    // Open CORS: the registry data is public
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/todos", get(todos))
        .route("/registro/{registro_ans}", get(by_registro))
        .route("/cnpj/{cnpj}", get(by_cnpj))
        .route("/cidade/{cidade}", get(by_cidade))
        .route("/uf/{uf}", get(by_uf))
        .route("/modalidade/{modalidade}", get(by_modalidade))
        .route("/buscar", get(buscar))
        .layer(cors)
        .with_state(Arc::new(store))
}

/// Start the HTTP server.
pub async fn start_server(
    port: u16,
    store: OperatorStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let data_path = store.path().display().to_string();
    let app = router(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 cadop server running on http://localhost:{}", port);
    println!("   Data file: {}", data_path);
    println!("   GET /            - Route map");
    println!("   GET /todos       - Full listing");
    println!("   GET /buscar      - Combined search");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Static descriptive payload. Never fails, even with no data file.
async fn home() -> Json<Value> {
    Json(json!({
        "mensagem": "Bem-vindo à API de Operadoras da ANS.",
        "descricao": "Esta API permite consultar os dados públicos divulgados pelo Governo Federal à respeito das Operadoras cadastradas na ANS.",
        "rotas_disponiveis": {
            "/todos": "Exibe todos os dados disponíveis para consulta",
            "/buscar": "Busca avançada com múltiplos filtros (registro, CNPJ, cidade, UF, modalidade)",
            "/registro/{registro_ans}": "Consulta operadora pelo Registro ANS",
            "/cnpj/{cnpj}": "Consulta operadora pelo CNPJ",
            "/cidade/{cidade}": "Lista operadoras por cidade",
            "/uf/{uf}": "Lista operadoras por estado",
            "/modalidade/{modalidade}": "Lista operadoras por modalidade"
        },
        "exemplos_de_uso": {
            "Buscar por Registro ANS": "/registro/419761",
            "Buscar por CNPJ": "/cnpj/19541931000125",
            "Buscar operadoras em São Paulo": "/cidade/São Paulo",
            "Buscar operadoras em Minas Gerais": "/uf/MG",
            "Buscar operadoras de Odontologia": "/modalidade/Odontologia de Grupo",
            "Busca avançada (cidade + UF)": "/buscar?cidade=Belo Horizonte&uf=MG"
        }
    }))
}

/// Full listing, wrapped with the record count.
async fn todos(State(store): State<SharedStore>) -> Result<Json<TodosResponse>, ApiError> {
    let dados = store.load()?;

    let dados = query::todos(&dados).map_err(|_| ApiError::not_found("Nenhum dado encontrado"))?;

    Ok(Json(TodosResponse {
        total_registros: dados.len(),
        dados,
    }))
}

async fn by_registro(
    State(store): State<SharedStore>,
    Path(registro_ans): Path<String>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::by_registro(&dados, &registro_ans).map_err(|_| {
        ApiError::not_found(format!("Registro {} não encontrado", registro_ans))
    })?;

    Ok(Json(hits))
}

async fn by_cnpj(
    State(store): State<SharedStore>,
    Path(cnpj): Path<String>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::by_cnpj(&dados, &cnpj)
        .map_err(|_| ApiError::not_found(format!("CNPJ {} não encontrado", cnpj)))?;

    Ok(Json(hits))
}

async fn by_cidade(
    State(store): State<SharedStore>,
    Path(cidade): Path<String>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::by_cidade(&dados, &cidade).map_err(|_| {
        ApiError::not_found(format!("Nenhuma operadora encontrada na cidade {}", cidade))
    })?;

    Ok(Json(hits))
}

async fn by_uf(
    State(store): State<SharedStore>,
    Path(uf): Path<String>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::by_uf(&dados, &uf).map_err(|_| {
        ApiError::not_found(format!("Nenhuma operadora encontrada no estado {}", uf))
    })?;

    Ok(Json(hits))
}

async fn by_modalidade(
    State(store): State<SharedStore>,
    Path(modalidade): Path<String>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::by_modalidade(&dados, &modalidade).map_err(|_| {
        ApiError::not_found(format!(
            "Nenhuma operadora encontrada na modalidade {}",
            modalidade
        ))
    })?;

    Ok(Json(hits))
}

/// Combined search: any subset of the five criteria, conjunction semantics.
async fn buscar(
    State(store): State<SharedStore>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<Json<Vec<Operator>>, ApiError> {
    let dados = store.load()?;

    let hits = query::filter(&dados, &criteria).map_err(|_| {
        ApiError::not_found("Nenhum resultado encontrado com os filtros fornecidos")
    })?;

    Ok(Json(hits))
}
