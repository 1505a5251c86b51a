//! Loopback demo: drive a call against an in-process transport that
//! echoes every written message back as the next read.
//!
//! The completion queue is a plain `VecDeque` pumped by `main`, which
//! plays the role of the queue's polling execution context.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use wirecall::{Call, CallTransport, Completion, Status, StreamObserver, Ticket, TransportStatus};

struct Loopback {
    completions: Arc<Mutex<VecDeque<Completion>>>,
    echoes: VecDeque<Bytes>,
}

impl Loopback {
    fn push(&self, completion: Completion) {
        self.completions.lock().unwrap().push_back(completion);
    }
}

impl CallTransport for Loopback {
    fn submit_start(&mut self, ticket: Ticket) {
        self.push(Completion::success(ticket));
    }

    fn submit_read(&mut self, ticket: Ticket) {
        match self.echoes.pop_front() {
            Some(message) => self.push(Completion::message(ticket, message)),
            None => self.push(Completion::failed(ticket)),
        }
    }

    fn submit_write(&mut self, ticket: Ticket, message: Bytes) {
        self.echoes.push_back(message);
        self.push(Completion::success(ticket));
    }

    fn submit_finish(&mut self, ticket: Ticket) {
        self.push(Completion::status(ticket, TransportStatus::ok()));
    }

    fn try_cancel(&mut self) {}
}

struct Printer {
    generation: AtomicU64,
}

impl StreamObserver for Printer {
    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn on_stream_start(&self) {
        println!("stream started");
    }

    fn on_stream_read(&self, message: Bytes) {
        println!("read back: {:?}", String::from_utf8_lossy(&message));
    }

    fn on_stream_write(&self) {
        println!("write accepted");
    }

    fn on_stream_error(&self, status: Status) {
        println!("stream error: {status}");
    }
}

fn pump(call: &mut Call<Loopback, Printer>, queue: &Arc<Mutex<VecDeque<Completion>>>) {
    loop {
        // Take the lock only for the pop: dispatch pushes new
        // completions back into the same queue.
        let next = queue.lock().unwrap().pop_front();
        let Some(completion) = next else { break };
        call.complete(completion);
    }
}

fn main() {
    let queue = Arc::new(Mutex::new(VecDeque::new()));
    let transport = Loopback {
        completions: queue.clone(),
        echoes: VecDeque::new(),
    };
    let observer = Arc::new(Printer {
        generation: AtomicU64::new(0),
    });
    let mut call = Call::new(transport, &observer);

    call.start();
    pump(&mut call, &queue);

    call.write(Bytes::from_static(b"hello"));
    call.write(Bytes::from_static(b"world"));
    pump(&mut call, &queue);

    call.read();
    pump(&mut call, &queue);
    call.read();
    pump(&mut call, &queue);

    call.finish();
    pump(&mut call, &queue);
    println!("done, {} ops in flight", call.in_flight_ops());
}
