mod common;
mod dedupe;
mod pipeline;
