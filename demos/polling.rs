use dupe_alert::{
    AlertPlayer,
    AutoConfirm,
    Capabilities,
    FileStore,
    ModalController,
    OfferManager,
    OfferTracker,
    PollEvent,
    Settings,
    TrackedOffer,
    format::trisect_groups,
};
use owo_colors::OwoColorize;

struct TerminalBell;

impl AlertPlayer for TerminalBell {
    fn play(&mut self) {
        print!("\x07");
    }
    
    fn stop(&mut self) {}
}

struct TerminalModal;

impl ModalController for TerminalModal {
    fn show(&mut self, offers: &[TrackedOffer]) {
        println!("{}", "New offers!".bold().green());
        
        for tracked in offers.iter().filter(|tracked| !tracked.resolved) {
            println!("{}", tracked.offer);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();
    
    let settings = Settings::from_env();
    let store = FileStore::open_default()?;
    
    println!("Polling {} every {}s, state in {}", settings.url, settings.timeout, store.filepath().display());
    
    let tracker = OfferTracker::new(store, Capabilities {
        confirmer: Box::new(AutoConfirm),
        alert: Box::new(TerminalBell),
        modal: Box::new(TerminalModal),
    });
    let manager = OfferManager::new(settings.api()?);
    let mut receiver = manager.start_polling(tracker, settings.poll_options());
    
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = receiver.recv() => match event {
                Some(PollEvent::Polled(Ok(poll))) => {
                    let resolved = poll.offers.iter().filter(|tracked| tracked.resolved).count();
                    
                    println!(
                        "{} offer(s), {} resolved, next poll at {}",
                        poll.offers.len(),
                        resolved,
                        poll.next_poll_at.format("%H:%M:%S"),
                    );
                    
                    for tracked in &poll.offers {
                        let equity = tracked.offer.equity
                            .map(|equity| trisect_groups(&format!("{equity:.0}")).join(" "))
                            .unwrap_or_default();
                        
                        println!("  {} {}", tracked.id.dimmed(), equity);
                    }
                    
                    if poll.has_unseen_offer {
                        // Nothing to click in a terminal, treat the alert as seen once printed.
                        manager.dismiss_alert()?;
                    }
                },
                Some(PollEvent::Polled(Err(error))) => {
                    println!("{} {}", "Poll failed:".red(), error);
                },
                Some(PollEvent::Toggled { id, resolved }) => {
                    println!("Offer {id} resolved: {resolved}");
                },
                None => break,
            },
        }
    }
    
    if let Some(handle) = manager.stop_polling() {
        handle.await?;
    }
    
    Ok(())
}
