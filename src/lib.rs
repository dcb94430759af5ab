//! The library code for `quire`, a helper layer for blog front ends. It is
//! made of two largely independent parts.
//!
//! The first, and the more involved, is the sidebar pipeline: a blog's sidebar
//! is an ordered list of widget [`widget::Instance`]s, each naming a
//! pluggable [`widget::Widget`] variant registered in a
//! [`registry::Registry`]. The [`pipeline::Pipeline`] renders every instance
//! in order and concatenates the fragments. Each render passes through the
//! isolation boundary in [`render`], so a widget that errors, panics, or no
//! longer exists costs the reader only that widget's box: it is replaced by
//! [`pipeline::PLACEHOLDER`] and reported to the [`sink::Sink`] the
//! application injected at startup.
//!
//! The second is a set of stateless view [`helpers`]: the robots-indexing
//! policy, nofollow link rewriting, reply and permalink anchors, and date
//! display. These return their errors to the caller.
//!
//! [`config`] loads a blog and its persisted sidebar from a `quire.yaml`
//! project file for the command-line front end.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod blog;
pub mod config;
pub mod helpers;
pub mod html;
pub mod markdown;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod request;
pub mod sink;
pub mod widget;
pub mod widgets;
