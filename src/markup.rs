/// Markup of the TechGadget Store page. [`crate::Storefront::new`] loads it.
pub const STOREFRONT_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>TechGadget Store</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header class="site-header">
    <h1 class="logo">TechGadget Store</h1>
    <nav class="header-actions">
      <button id="themeToggle" class="theme-toggle">🌙 Dark</button>
      <button id="cartBtn" class="cart-btn">🛒 Cart <span id="cartCount" class="cart-count">0</span></button>
    </nav>
  </header>

  <section class="hero">
    <h2>Latest gadgets, lowest prices</h2>
    <button id="shopNow" class="btn-primary">Shop Now</button>
  </section>

  <section class="event-demo">
    <h2>Event Handling</h2>
    <button id="clickDemo" class="demo-btn">Click Me</button>
    <button id="hoverDemo" class="demo-btn">Hover Over Me</button>
    <input id="keyboardDemo" type="text" placeholder="Type something...">
    <div id="eventOutput" class="event-output">Interact with the elements above to see events in action.</div>
  </section>

  <section class="interactive">
    <h2>Interactive Elements</h2>

    <div class="feature theme-feature">
      <h3>Theme Switcher</h3>
      <button id="themeSwitch" class="btn-secondary">Switch to Dark Mode</button>
    </div>

    <div class="feature counter-feature">
      <h3>Counter Game</h3>
      <div id="counterValue" class="counter-value">0</div>
      <button id="incrementBtn" class="btn-primary">Click to Increase</button>
      <button id="resetCounter" class="btn-secondary">Reset</button>
    </div>

    <div class="feature faq-feature">
      <h3>Frequently Asked Questions</h3>
      <div id="faq-returns" class="faq-item">
        <div class="faq-question">▶ What is your return policy?</div>
        <div class="faq-answer">Unused items can be returned within 30 days for a full refund.</div>
      </div>
      <div id="faq-shipping" class="faq-item">
        <div class="faq-question">▶ How long does shipping take?</div>
        <div class="faq-answer">Standard shipping takes 3-5 business days.</div>
      </div>
      <div id="faq-international" class="faq-item">
        <div class="faq-question">▶ Do you ship internationally?</div>
        <div class="faq-answer">Yes, we ship to over 50 countries worldwide.</div>
      </div>
    </div>

    <div class="feature tabs-feature">
      <h3>Product Details</h3>
      <div class="tab-buttons">
        <button class="tab-btn active" data-tab="description">Description</button>
        <button class="tab-btn" data-tab="specs">Specifications</button>
        <button class="tab-btn" data-tab="reviews">Reviews</button>
      </div>
      <div class="tab-content">
        <div id="description" class="tab-pane active">A sleek smartwatch with all-day battery life.</div>
        <div id="specs" class="tab-pane">Display: 1.4" AMOLED. Battery: 48h. Water resistant: 5 ATM.</div>
        <div id="reviews" class="tab-pane">★★★★★ "Best gadget I've bought this year!"</div>
      </div>
    </div>
  </section>

  <section class="contact">
    <h2>Contact Us</h2>
    <form id="contactForm" novalidate>
      <div class="form-group">
        <label for="name">Name *</label>
        <input id="name" type="text" name="name">
        <span id="nameError" class="error-message"></span>
      </div>
      <div class="form-group">
        <label for="email">Email *</label>
        <input id="email" type="email" name="email">
        <span id="emailError" class="error-message"></span>
      </div>
      <div class="form-group">
        <label for="phone">Phone</label>
        <input id="phone" type="tel" name="phone">
        <span id="phoneError" class="error-message"></span>
      </div>
      <div class="form-group">
        <label for="password">Password *</label>
        <input id="password" type="password" name="password">
        <span id="passwordError" class="error-message"></span>
      </div>
      <div class="form-group">
        <label for="message">Message</label>
        <textarea id="message" name="message" rows="4"></textarea>
        <span id="messageCount" class="char-count"></span>
        <span id="messageError" class="error-message"></span>
      </div>
      <button id="submitBtn" type="submit" class="btn-primary">Send Message</button>
    </form>
    <div id="formSuccess" class="form-success" style="display: none;"></div>
  </section>

  <footer class="site-footer">
    <p>&copy; 2024 TechGadget Store</p>
  </footer>
  <script src="script.js"></script>
</body>
</html>
"##;
