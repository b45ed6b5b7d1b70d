// tweetnet: tweet similarity graphs and information-theory metrics
//
// This is the library root. `information` is a standalone leaf; the other
// modules make up the graph-building pipeline used by the CLI.

pub mod config;
pub mod graph;
pub mod information;
pub mod output;
pub mod sentiment;
pub mod tweets;
