//! Trip planner server.
//!
//! A web application that takes a traveller's budget and dates, asks a
//! discovery service for matching destinations, and estimates what a trip
//! to each would cost.

pub mod config;
pub mod discovery;
pub mod domain;
pub mod estimate;
pub mod view;
pub mod web;
