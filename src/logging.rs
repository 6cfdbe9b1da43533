//! ログ出力の初期化
//!
//! 取り込み中はスピナー（`MultiProgress`）が stderr を再描画し続けるため、
//! ログ行は描画を一時停止してから書き込む。

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` が無いときのフィルタ
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "lolbuilds=debug"
    } else {
        "warn"
    }
}

/// グローバルな subscriber を登録
pub fn init(verbose: bool, progress: MultiProgress) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(ProgressWriter::new(progress, io::stderr))
                .with_target(false),
        )
        .init();
}

/// スピナーの描画を止めてから内側の writer に書き込む `MakeWriter`
#[derive(Clone)]
pub struct ProgressWriter<M> {
    progress: MultiProgress,
    inner: M,
}

impl<M> ProgressWriter<M> {
    pub fn new(progress: MultiProgress, inner: M) -> Self {
        Self { progress, inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for ProgressWriter<M> {
    type Writer = SuspendedWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedWriter {
            progress: self.progress.clone(),
            inner: self.inner.make_writer(),
        }
    }
}

pub struct SuspendedWriter<W> {
    progress: MultiProgress,
    inner: W,
}

impl<W: Write> Write for SuspendedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.flush())
    }
}
