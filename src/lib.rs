use worker::*;

mod config;
mod error;
mod gpt;
mod handlers;
mod http;
mod logging;
mod messages;
mod models;
mod ocr;
mod storage;
mod telegram;
#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::handlers::{Ack, ExamBot};
use crate::models::Update;

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    // Get request URL
    let url = req.url()?;
    let path = url.path();

    match path {
        "/" => Response::ok("Exam bot is running!"),
        "/webhook" => handle_webhook(req, env).await,
        _ => Response::error("Not Found", 404),
    }
}

async fn handle_webhook(mut req: Request, env: Env) -> Result<Response> {
    if req.method() != Method::Post {
        return Response::error("Method Not Allowed", 405);
    }

    let config = match Config::from_env(&env) {
        Ok(config) => config,
        Err(e) => {
            console_error!("Failed to load configuration: {}", e);
            return Response::error("Internal Server Error", 500);
        }
    };
    logging::init(&config.log_level);

    // Parse the update from request body
    let update = match req.json::<Update>().await {
        Ok(update) => update,
        Err(e) => {
            tracing::error!(error = %e, "failed to parse update");
            return Response::error("Bad Request", 400);
        }
    };

    let bot = match ExamBot::from_config(&env, &config) {
        Ok(bot) => bot,
        Err(e) => {
            tracing::error!(error = %e, "failed to build bot");
            return Response::error("Internal Server Error", 500);
        }
    };

    match bot.handle_update(update).await {
        Ok(ack) => ack_response(ack),
        Err(e) if e.is_bad_request() => {
            tracing::warn!(error = %e, "rejected update");
            Response::error("Bad Request", 400)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to process update");
            Response::error("Internal Server Error", 500)
        }
    }
}

fn ack_response(ack: Ack) -> Result<Response> {
    Response::ok(ack.body()).map(|resp| resp.with_status(Ack::STATUS_CODE))
}
