//! nldump command - dump the kernel's link and address tables as raw bytes.

use std::io;

use clap::{Parser, ValueEnum};
use nldump::netlink::{
    BindMode, ClientConfig, DEFAULT_RECV_CAPACITY, DumpClient, DumpKind, DumpRequest, Termination,
};
use nldump::output::{DumpReport, OutputFormat, OutputOptions, format_bytes, print_all};

#[derive(Parser)]
#[command(
    name = "nldump",
    version,
    about = "Dump raw rtnetlink link and address tables"
)]
struct Cli {
    /// Which table(s) to dump.
    #[arg(short = 'k', long, value_enum, default_value_t = Kind::All)]
    kind: Kind,

    /// Sequence number for each request.
    #[arg(long, default_value_t = 1)]
    seq: u32,

    /// Use IPv4 only.
    #[arg(short = '4', conflicts_with = "ipv6")]
    ipv4: bool,

    /// Use IPv6 only.
    #[arg(short = '6')]
    ipv6: bool,

    /// Bind to a kernel-assigned port before sending.
    #[arg(long)]
    bind: bool,

    /// Stop on NLMSG_DONE instead of the first 20-byte datagram.
    #[arg(long)]
    until_done: bool,

    /// Receive buffer size per datagram, in bytes.
    #[arg(long, default_value_t = DEFAULT_RECV_CAPACITY)]
    recv_capacity: usize,

    /// Bytes per hex line (0 = one line per datagram).
    #[arg(short = 'w', long, default_value_t = 0)]
    wrap: usize,

    /// Output JSON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// Network interfaces.
    #[value(alias = "l")]
    Link,
    /// Interface addresses.
    #[value(alias = "a", alias = "addr")]
    Address,
    /// Links, then addresses.
    All,
}

impl Kind {
    fn kinds(self) -> &'static [DumpKind] {
        match self {
            Kind::Link => &[DumpKind::Link],
            Kind::Address => &[DumpKind::Address],
            Kind::All => &DumpKind::ALL,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ClientConfig::new()
        .bind(if cli.bind {
            BindMode::Kernel
        } else {
            BindMode::Auto
        })
        .recv_capacity(cli.recv_capacity)
        .termination(if cli.until_done {
            Termination::Done
        } else {
            Termination::SentinelLength
        });

    let family = match (cli.ipv4, cli.ipv6) {
        (true, false) => libc::AF_INET as u8,
        (false, true) => libc::AF_INET6 as u8,
        _ => libc::AF_UNSPEC as u8,
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let opts = OutputOptions {
        pretty: cli.pretty,
        wrap: cli.wrap,
    };

    let mut client = DumpClient::open_with(config)?;
    tracing::info!(pid = client.pid(), "socket open");

    let mut reports = Vec::new();
    for &kind in cli.kind.kinds() {
        // Each dump is drained completely before the next request goes out.
        let request = DumpRequest::new(kind, cli.seq, client.pid()).with_family(family);
        client.send_request(&request)?;
        let response = client.receive_all()?;
        tracing::info!(
            %kind,
            chunks = response.len(),
            size = %format_bytes(response.total_len()),
            "dump finished"
        );

        let report = DumpReport::new(kind, cli.seq, &response);
        if format == OutputFormat::Text {
            print_all(&mut io::stdout().lock(), &[report], format, &opts)?;
        } else {
            reports.push(report);
        }
    }
    client.close();

    if format == OutputFormat::Json {
        print_all(&mut io::stdout().lock(), &reports, format, &opts)?;
    }

    Ok(())
}
